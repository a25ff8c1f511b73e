//! Results attached to a response. The orchestrator turns each into an event
//! on the composite (and optionally its claim). A fatal result fails the
//! pipeline run without failing the RPC.

use std::fmt;

use xfn_proto::v1::{self, RunFunctionResponse, Severity, Target};

/// Chainable handle to a result just appended to a response.
#[derive(Debug)]
pub struct ResultOption<'a> {
    result: &'a mut v1::Result,
}

impl<'a> ResultOption<'a> {
    pub fn target_composite(self) -> Self {
        self.result.set_target(Target::Composite);
        self
    }

    pub fn target_composite_and_claim(self) -> Self {
        self.result.set_target(Target::CompositeAndClaim);
        self
    }

    pub fn with_reason(self, reason: impl Into<String>) -> Self {
        self.result.reason = Some(reason.into());
        self
    }
}

pub fn fatal(rsp: &mut RunFunctionResponse, err: impl fmt::Display) -> ResultOption<'_> {
    new_result(rsp, Severity::Fatal, err.to_string())
}

pub fn warning(rsp: &mut RunFunctionResponse, err: impl fmt::Display) -> ResultOption<'_> {
    new_result(rsp, Severity::Warning, err.to_string())
}

pub fn normal(rsp: &mut RunFunctionResponse, message: impl Into<String>) -> ResultOption<'_> {
    new_result(rsp, Severity::Normal, message.into())
}

/// `normalf(&mut rsp, format_args!("created {n} buckets"))`
pub fn normalf<'a>(rsp: &'a mut RunFunctionResponse, args: fmt::Arguments<'_>) -> ResultOption<'a> {
    normal(rsp, args.to_string())
}

fn new_result(rsp: &mut RunFunctionResponse, severity: Severity, message: String) -> ResultOption<'_> {
    let mut r = v1::Result { message, ..Default::default() };
    r.set_severity(severity);
    r.set_target(Target::Composite);
    rsp.results.push(r);
    let last = rsp.results.len() - 1;
    ResultOption { result: &mut rsp.results[last] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_default_to_the_composite() {
        let mut rsp = RunFunctionResponse::default();
        fatal(&mut rsp, anyhow::anyhow!("boom"));
        warning(&mut rsp, "careful").with_reason("Careful").target_composite_and_claim();
        normalf(&mut rsp, format_args!("created {} buckets", 2));

        assert_eq!(rsp.results.len(), 3);
        assert_eq!(rsp.results[0].severity(), Severity::Fatal);
        assert_eq!(rsp.results[0].message, "boom");
        assert_eq!(rsp.results[0].target(), Target::Composite);

        assert_eq!(rsp.results[1].severity(), Severity::Warning);
        assert_eq!(rsp.results[1].reason.as_deref(), Some("Careful"));
        assert_eq!(rsp.results[1].target(), Target::CompositeAndClaim);

        assert_eq!(rsp.results[2].severity(), Severity::Normal);
        assert_eq!(rsp.results[2].message, "created 2 buckets");
        assert_eq!(rsp.results[2].reason, None);
    }

    #[test]
    fn retargeting_back_to_the_composite() {
        let mut rsp = RunFunctionResponse::default();
        normal(&mut rsp, "ok").target_composite_and_claim().target_composite();
        assert_eq!(rsp.results[0].target, Some(Target::Composite as i32));
    }
}
