//! Bridge between protobuf `Struct`s and documents or typed objects.
//!
//! Document-backed types take a fast path that copies values straight
//! across, so numbers stay floating point. Everything else goes through JSON
//! bytes and serde, with unknown members rejected.

use prost_types::{value::Kind, ListValue, NullValue, Struct, Value as WireValue};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Number, Value};
use xfn_core::fieldpath::exact_integer;
use xfn_core::{DecodeReason, Document, Error, Result};

/// Anything the bridge converts.
///
/// Document-backed types expose their raw content so conversion can skip the
/// JSON round trip. Typed structures keep the default methods.
pub trait Object {
    fn content(&self) -> Option<&Document> {
        None
    }

    fn content_mut(&mut self) -> Option<&mut Document> {
        None
    }
}

impl Object for Document {
    fn content(&self) -> Option<&Document> {
        Some(self)
    }

    fn content_mut(&mut self) -> Option<&mut Document> {
        Some(self)
    }
}

/// Fill `into` from a wire struct.
pub fn as_object<T>(s: &Struct, into: &mut T) -> Result<()>
where
    T: Object + DeserializeOwned,
{
    if let Some(content) = into.content_mut() {
        *content = struct_to_document(s)?;
        return Ok(());
    }
    *into = decode_strict(s)?;
    Ok(())
}

/// Build a wire struct from `from`.
pub fn as_struct<T>(from: &T) -> Result<Struct>
where
    T: Object + Serialize + ?Sized,
{
    match from.content() {
        Some(content) => Ok(document_to_struct(content)),
        None => encode_struct(from),
    }
}

/// Decode a wire struct into `T`, failing on members `T` does not declare.
pub fn decode_strict<T: DeserializeOwned>(s: &Struct) -> Result<T> {
    let target = short_type_name::<T>();
    let mut rendered = Document::new();
    for (k, v) in &s.fields {
        rendered.insert(k.clone(), to_json(v, true)?);
    }
    let bytes = serde_json::to_vec(&rendered).map_err(|e| Error::decode(target, DecodeReason::Malformed(e.to_string())))?;

    let mut unknown = Vec::new();
    let mut de = serde_json::Deserializer::from_slice(&bytes);
    let out: T = serde_ignored::deserialize(&mut de, |path| unknown.push(path.to_string()))
        .map_err(|e| Error::decode(target, DecodeReason::Malformed(e.to_string())))?;
    if !unknown.is_empty() {
        return Err(Error::decode(target, DecodeReason::UnknownFields(unknown)));
    }
    Ok(out)
}

/// Encode any serializable value as a wire struct. The value must serialize
/// to a JSON object.
pub fn encode_struct<T: Serialize + ?Sized>(from: &T) -> Result<Struct> {
    let target = short_type_name::<T>();
    match serde_json::to_value(from).map_err(|e| Error::encode(target, e))? {
        Value::Object(m) => Ok(document_to_struct(&m)),
        other => Err(Error::encode(target, format!("expected a JSON object, got {}", json_kind(&other)))),
    }
}

/// Parse a JSON object into a wire struct.
pub fn struct_from_json(json: &str) -> Result<Struct> {
    let v: Value = serde_json::from_str(json).map_err(|e| Error::decode("Struct", DecodeReason::Malformed(e.to_string())))?;
    match v {
        Value::Object(m) => Ok(document_to_struct(&m)),
        other => Err(Error::decode(
            "Struct",
            DecodeReason::Malformed(format!("expected a JSON object, got {}", json_kind(&other))),
        )),
    }
}

/// Copy a wire struct into a document. Numbers become JSON floats.
pub fn struct_to_document(s: &Struct) -> Result<Document> {
    s.fields.iter().map(|(k, v)| Ok((k.clone(), to_json(v, false)?))).collect()
}

pub fn document_to_struct(doc: &Document) -> Struct {
    Struct { fields: doc.iter().map(|(k, v)| (k.clone(), to_wire(v))).collect() }
}

pub fn value_to_json(v: &WireValue) -> Result<Value> {
    to_json(v, false)
}

pub fn json_to_value(v: &Value) -> WireValue {
    to_wire(v)
}

// With `integral` set, whole numbers in the exact range are rendered
// without a fraction, the way the protobuf JSON mapping prints them.
fn to_json(v: &WireValue, integral: bool) -> Result<Value> {
    Ok(match &v.kind {
        None | Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(*b),
        Some(Kind::StringValue(s)) => Value::String(s.clone()),
        Some(Kind::NumberValue(n)) => Value::Number(number(*n, integral)?),
        Some(Kind::ListValue(l)) => {
            Value::Array(l.values.iter().map(|v| to_json(v, integral)).collect::<Result<_>>()?)
        }
        Some(Kind::StructValue(s)) => {
            let mut m = Document::new();
            for (k, v) in &s.fields {
                m.insert(k.clone(), to_json(v, integral)?);
            }
            Value::Object(m)
        }
    })
}

fn number(n: f64, integral: bool) -> Result<Number> {
    if let Some(i) = exact_integer(n).filter(|_| integral) {
        return Ok(Number::from(i));
    }
    Number::from_f64(n).ok_or_else(|| Error::decode("Struct", DecodeReason::NonFinite))
}

fn to_wire(v: &Value) -> WireValue {
    let kind = match v {
        Value::Null => Kind::NullValue(NullValue::NullValue as i32),
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(items) => Kind::ListValue(ListValue { values: items.iter().map(to_wire).collect() }),
        Value::Object(m) => Kind::StructValue(document_to_struct(m)),
    };
    WireValue { kind: Some(kind) }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Input {
        #[serde(default)]
        replicas: i64,
        #[serde(default)]
        region: String,
    }

    impl Object for Input {}

    #[test]
    fn fast_path_keeps_floats() {
        let s = document_to_struct(&doc(json!({"spec": {"widgets": 9001}})));
        let mut d = Document::new();
        as_object(&s, &mut d).unwrap();
        assert_eq!(d["spec"]["widgets"], json!(9001.0));
        assert!(d["spec"]["widgets"].is_f64());
    }

    #[test]
    fn typed_path_accepts_integral_floats_as_integers() {
        let s = document_to_struct(&doc(json!({"replicas": 3, "region": "eu"})));
        let mut input = Input::default();
        as_object(&s, &mut input).unwrap();
        assert_eq!(input, Input { replicas: 3, region: "eu".into() });
    }

    #[test]
    fn typed_path_rejects_and_names_unknown_fields() {
        let s = document_to_struct(&doc(json!({"replicas": 1, "bogus": true})));
        let mut input = Input::default();
        let err = as_object(&s, &mut input).unwrap_err();
        assert!(err.is_unknown_fields(), "{err}");
        assert!(err.to_string().contains("bogus"), "{err}");
        assert_eq!(input, Input::default());
    }

    #[test]
    fn fractional_number_does_not_fit_an_integer_field() {
        let s = document_to_struct(&doc(json!({"replicas": 1.5})));
        let err = decode_strict::<Input>(&s).unwrap_err();
        assert!(matches!(err, Error::Decode { reason: DecodeReason::Malformed(_), .. }), "{err}");
    }

    #[test]
    fn non_finite_numbers_fail_to_decode() {
        let mut s = Struct::default();
        s.fields.insert("x".into(), WireValue { kind: Some(Kind::NumberValue(f64::NAN)) });
        let err = struct_to_document(&s).unwrap_err();
        assert!(matches!(err, Error::Decode { reason: DecodeReason::NonFinite, .. }));
    }

    #[test]
    fn unset_kind_reads_as_null() {
        let mut s = Struct::default();
        s.fields.insert("x".into(), WireValue { kind: None });
        assert_eq!(struct_to_document(&s).unwrap()["x"], Value::Null);
    }

    #[test]
    fn typed_encode_must_be_an_object() {
        let err = encode_struct(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(err.to_string().contains("an array"), "{err}");

        let s = as_struct(&Input { replicas: 2, region: "us".into() }).unwrap();
        assert_eq!(s.fields["replicas"].kind, Some(Kind::NumberValue(2.0)));
        assert_eq!(s.fields["region"].kind, Some(Kind::StringValue("us".into())));
    }

    #[test]
    fn struct_from_json_rejects_non_objects() {
        let s = struct_from_json(r#"{"a":[1,"b",null,{"c":false}]}"#).unwrap();
        let d = struct_to_document(&s).unwrap();
        assert_eq!(Value::Object(d), json!({"a": [1.0, "b", null, {"c": false}]}));
        assert!(struct_from_json("[1]").is_err());
        assert!(struct_from_json("{").is_err());
    }

    #[test]
    fn type_names_are_short() {
        assert_eq!(short_type_name::<Input>(), "Input");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
    }
}
