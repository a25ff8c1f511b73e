//! Building a `RunFunctionResponse`.
//!
//! The setters install content into the response in place. Desired state
//! accumulates over a pipeline, so callers overwrite what earlier functions
//! produced only when they mean to.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use xfn_core::Result;
use xfn_proto::v1::{self, ResourceSelector, ResponseMeta, RunFunctionRequest, RunFunctionResponse};
use xfn_resource::convert::{as_struct, encode_struct};
use xfn_resource::{Composite, DesiredComposed, Name, Unstructured};

/// How long an orchestrator may cache a response by default.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Start a response to `req`. The request's desired state and context are
/// carried over unchanged.
pub fn to(req: &RunFunctionRequest, ttl: Duration) -> RunFunctionResponse {
    RunFunctionResponse {
        meta: Some(ResponseMeta {
            tag: req.meta.as_ref().map(|m| m.tag.clone()).unwrap_or_default(),
            ttl: Some(wire_duration(ttl)),
        }),
        desired: req.desired.clone(),
        context: req.context.clone(),
        ..Default::default()
    }
}

pub fn set_context_key(rsp: &mut RunFunctionResponse, key: &str, value: prost_types::Value) {
    rsp.context.get_or_insert_with(Default::default).fields.insert(key.to_string(), value);
}

pub fn set_desired_composite_resource(rsp: &mut RunFunctionResponse, xr: &Composite) -> Result<()> {
    let resource = as_struct(&xr.resource)?;
    let mut r = v1::Resource {
        resource: Some(resource),
        connection_details: xr.connection_details.clone(),
        ..Default::default()
    };
    r.set_ready(xr.ready.into());
    rsp.desired.get_or_insert_with(Default::default).composite = Some(r);
    Ok(())
}

/// Install desired composed resources by name, replacing any of the same
/// name. Nothing is installed if any resource fails to encode.
pub fn set_desired_composed_resources(
    rsp: &mut RunFunctionResponse,
    dcds: &BTreeMap<Name, DesiredComposed>,
) -> Result<()> {
    let mut encoded = Vec::with_capacity(dcds.len());
    for (name, dcd) in dcds {
        let mut r = v1::Resource { resource: Some(as_struct(&dcd.resource)?), ..Default::default() };
        r.set_ready(dcd.ready.into());
        encoded.push((name.to_string(), r));
    }
    rsp.desired.get_or_insert_with(Default::default).resources.extend(encoded);
    Ok(())
}

/// Like [`set_desired_composed_resources`] for plain resources, which are
/// installed without readiness.
pub fn set_desired_resources(rsp: &mut RunFunctionResponse, drs: &BTreeMap<Name, Unstructured>) -> Result<()> {
    let mut encoded = Vec::with_capacity(drs.len());
    for (name, u) in drs {
        encoded.push((name.to_string(), v1::Resource { resource: Some(as_struct(u)?), ..Default::default() }));
    }
    rsp.desired.get_or_insert_with(Default::default).resources.extend(encoded);
    Ok(())
}

/// Set the function's output. `output` must serialize to a JSON object.
pub fn set_output<T: Serialize + ?Sized>(rsp: &mut RunFunctionResponse, output: &T) -> Result<()> {
    rsp.output = Some(encode_struct(output)?);
    Ok(())
}

/// Ask the orchestrator to fetch resources matching `selector` and supply
/// them as `name` on the next invocation.
pub fn require_resources(rsp: &mut RunFunctionResponse, name: &str, selector: ResourceSelector) {
    rsp.requirements.get_or_insert_with(Default::default).resources.insert(name.to_string(), selector);
}

fn wire_duration(d: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        nanos: d.subsec_nanos() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use xfn_proto::v1::{RequestMeta, State};
    use xfn_resource::convert::struct_from_json;
    use xfn_resource::{ComposedResource, Ready};

    fn unstructured(v: serde_json::Value) -> Unstructured {
        match v {
            serde_json::Value::Object(m) => Unstructured::from_document(m),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn to_copies_tag_desired_and_context() {
        let desired = State {
            composite: Some(v1::Resource {
                resource: Some(struct_from_json(r#"{"spec":{"a":1}}"#).unwrap()),
                ..Default::default()
            }),
            resources: HashMap::from([("r".to_string(), v1::Resource::default())]),
        };
        let req = RunFunctionRequest {
            meta: Some(RequestMeta { tag: "hello".into() }),
            desired: Some(desired.clone()),
            context: Some(struct_from_json(r#"{"k":"v"}"#).unwrap()),
            ..Default::default()
        };
        let rsp = to(&req, DEFAULT_TTL);
        let meta = rsp.meta.unwrap();
        assert_eq!(meta.tag, "hello");
        assert_eq!(meta.ttl, Some(prost_types::Duration { seconds: 60, nanos: 0 }));
        assert_eq!(rsp.desired, Some(desired));
        assert_eq!(rsp.context, req.context);
        assert!(rsp.results.is_empty());
    }

    #[test]
    fn composite_is_installed_with_readiness() {
        let mut rsp = RunFunctionResponse::default();
        let mut xr = Composite { ready: Ready::False, ..Default::default() };
        xr.resource.set_kind("XR");
        xr.connection_details.insert("url".into(), b"https://".to_vec());
        set_desired_composite_resource(&mut rsp, &xr).unwrap();

        let r = rsp.desired.unwrap().composite.unwrap();
        assert_eq!(r.ready(), v1::Ready::False);
        assert_eq!(r.connection_details["url"], b"https://".to_vec());
        assert_eq!(r.resource, Some(struct_from_json(r#"{"kind":"XR"}"#).unwrap()));
    }

    #[test]
    fn composed_resources_merge_into_existing_desired_state() {
        let mut rsp = RunFunctionResponse {
            desired: Some(State {
                resources: HashMap::from([("kept".to_string(), v1::Resource::default())]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut dc = DesiredComposed { ready: Ready::True, ..Default::default() };
        dc.resource = ComposedResource::from(unstructured(json!({"kind": "Bucket"})));
        set_desired_composed_resources(&mut rsp, &BTreeMap::from([(Name::from("bucket"), dc)])).unwrap();

        let resources = rsp.desired.unwrap().resources;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources["bucket"].ready(), v1::Ready::True);
    }

    #[test]
    fn plain_resources_are_installed_as_is() {
        let mut rsp = RunFunctionResponse::default();
        let cool = unstructured(json!({
            "apiVersion": "example.org/v1",
            "kind": "Test",
            "metadata": {"name": "cool"},
            "spec": {"cool": true},
        }));
        set_desired_resources(&mut rsp, &BTreeMap::from([(Name::from("Cool"), cool)])).unwrap();
        let want = struct_from_json(
            r#"{"apiVersion":"example.org/v1","kind":"Test","metadata":{"name":"cool"},"spec":{"cool":true}}"#,
        )
        .unwrap();
        let r = &rsp.desired.unwrap().resources["Cool"];
        assert_eq!(r.resource, Some(want));
        assert_eq!(r.ready(), v1::Ready::Unspecified);
    }

    #[test]
    fn output_must_be_an_object() {
        #[derive(Serialize)]
        struct Out {
            cool: &'static str,
        }
        let mut rsp = RunFunctionResponse::default();
        assert!(set_output(&mut rsp, &"scalar").is_err());
        assert_eq!(rsp.output, None);

        set_output(&mut rsp, &Out { cool: "very" }).unwrap();
        assert_eq!(rsp.output, Some(struct_from_json(r#"{"cool":"very"}"#).unwrap()));
    }

    #[test]
    fn context_keys_and_requirements_create_their_containers() {
        let mut rsp = RunFunctionResponse::default();
        set_context_key(&mut rsp, "k", prost_types::Value { kind: Some(prost_types::value::Kind::BoolValue(true)) });
        assert_eq!(rsp.context.as_ref().map(|c| c.fields.len()), Some(1));

        require_resources(&mut rsp, "cfg", ResourceSelector::by_name("v1", "ConfigMap", "settings"));
        let reqs = rsp.requirements.unwrap();
        assert_eq!(reqs.resources["cfg"].kind, "ConfigMap");
        assert!(reqs.extra_resources.is_empty());
    }
}
