//! Typed views of a `RunFunctionRequest`.
//!
//! Everything here is read-only and tolerant of absent optional fields:
//! a missing composite reads as an empty one, missing composed resources as
//! an empty map.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use xfn_core::{Error, Result};
use xfn_proto::v1::{self, credentials::Source, RunFunctionRequest};
use xfn_resource::convert::{as_object, Object};
use xfn_resource::{
    ComposedResource, Composite, CompositeResource, Credentials, DesiredComposed, Name, ObservedComposed, Required,
    Unstructured,
};

/// Decode the function's input into `into`. Without input, `into` is left
/// as it was.
pub fn get_input<T: Object + DeserializeOwned>(req: &RunFunctionRequest, into: &mut T) -> Result<()> {
    match &req.input {
        Some(input) => as_object(input, into),
        None => Ok(()),
    }
}

pub fn get_context_key<'a>(req: &'a RunFunctionRequest, key: &str) -> Option<&'a prost_types::Value> {
    req.context.as_ref()?.fields.get(key)
}

pub fn get_observed_composite_resource(req: &RunFunctionRequest) -> Result<Composite> {
    composite(req.observed.as_ref().and_then(|s| s.composite.as_ref()))
}

pub fn get_desired_composite_resource(req: &RunFunctionRequest) -> Result<Composite> {
    composite(req.desired.as_ref().and_then(|s| s.composite.as_ref()))
}

pub fn get_observed_composed_resources(req: &RunFunctionRequest) -> Result<BTreeMap<Name, ObservedComposed>> {
    let Some(state) = &req.observed else {
        return Ok(BTreeMap::new());
    };
    state
        .resources
        .iter()
        .map(|(name, r)| {
            let oc = ObservedComposed { resource: composed(r)?, connection_details: r.connection_details.clone() };
            Ok((Name::from(name.as_str()), oc))
        })
        .collect()
}

pub fn get_desired_composed_resources(req: &RunFunctionRequest) -> Result<BTreeMap<Name, DesiredComposed>> {
    let Some(state) = &req.desired else {
        return Ok(BTreeMap::new());
    };
    state
        .resources
        .iter()
        .map(|(name, r)| {
            let dc = DesiredComposed { resource: composed(r)?, ready: r.ready().into() };
            Ok((Name::from(name.as_str()), dc))
        })
        .collect()
}

/// Resources fetched to satisfy the function's requirements, by requirement
/// name. Groups only present in the legacy `extra_resources` field are
/// included; `required_resources` wins when both carry a group.
pub fn get_required_resources(req: &RunFunctionRequest) -> Result<BTreeMap<String, Vec<Required>>> {
    let mut out = BTreeMap::new();
    for (group, resources) in req.extra_resources.iter().chain(&req.required_resources) {
        let items = resources.items.iter().map(required).collect::<Result<Vec<_>>>()?;
        out.insert(group.clone(), items);
    }
    Ok(out)
}

#[deprecated(note = "use get_required_resources")]
pub fn get_extra_resources(req: &RunFunctionRequest) -> Result<BTreeMap<String, Vec<Required>>> {
    get_required_resources(req)
}

pub fn get_credentials(req: &RunFunctionRequest, name: &str) -> Result<Credentials> {
    let creds = req
        .credentials
        .get(name)
        .ok_or_else(|| Error::NotFound { kind: "credentials", name: name.to_string() })?;
    match &creds.source {
        Some(Source::CredentialData(d)) => Ok(Credentials::Data(d.data.clone())),
        None => Err(Error::UnsupportedSource { name: name.to_string() }),
    }
}

fn composite(r: Option<&v1::Resource>) -> Result<Composite> {
    let Some(r) = r else {
        return Ok(Composite::default());
    };
    let mut resource = CompositeResource::new();
    if let Some(s) = &r.resource {
        as_object(s, &mut resource)?;
    }
    Ok(Composite { resource, connection_details: r.connection_details.clone(), ready: r.ready().into() })
}

fn composed(r: &v1::Resource) -> Result<ComposedResource> {
    let mut resource = ComposedResource::new();
    if let Some(s) = &r.resource {
        as_object(s, &mut resource)?;
    }
    Ok(resource)
}

fn required(r: &v1::Resource) -> Result<Required> {
    let mut resource = Unstructured::new();
    if let Some(s) = &r.resource {
        as_object(s, &mut resource)?;
    }
    Ok(Required { resource })
}
