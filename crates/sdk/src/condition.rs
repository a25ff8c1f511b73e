//! Status conditions a function asks the orchestrator to set on the
//! composite resource.

use xfn_proto::v1::{self, RunFunctionResponse, Status, Target};

/// Chainable handle to a condition just appended to a response.
#[derive(Debug)]
pub struct ConditionOption<'a> {
    condition: &'a mut v1::Condition,
}

impl<'a> ConditionOption<'a> {
    pub fn target_composite(self) -> Self {
        self.condition.set_target(Target::Composite);
        self
    }

    pub fn target_composite_and_claim(self) -> Self {
        self.condition.set_target(Target::CompositeAndClaim);
        self
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        self.condition.message = Some(message.into());
        self
    }
}

pub fn condition_true<'a>(rsp: &'a mut RunFunctionResponse, r#type: &str, reason: &str) -> ConditionOption<'a> {
    new_condition(rsp, r#type, reason, Status::True)
}

pub fn condition_false<'a>(rsp: &'a mut RunFunctionResponse, r#type: &str, reason: &str) -> ConditionOption<'a> {
    new_condition(rsp, r#type, reason, Status::False)
}

pub fn condition_unknown<'a>(rsp: &'a mut RunFunctionResponse, r#type: &str, reason: &str) -> ConditionOption<'a> {
    new_condition(rsp, r#type, reason, Status::Unknown)
}

fn new_condition<'a>(
    rsp: &'a mut RunFunctionResponse,
    r#type: &str,
    reason: &str,
    status: Status,
) -> ConditionOption<'a> {
    let mut c = v1::Condition { r#type: r#type.to_string(), reason: reason.to_string(), ..Default::default() };
    c.set_status(status);
    c.set_target(Target::Composite);
    rsp.conditions.push(c);
    let last = rsp.conditions.len() - 1;
    ConditionOption { condition: &mut rsp.conditions[last] }
}
