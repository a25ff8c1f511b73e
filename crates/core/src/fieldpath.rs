//! Paved access to schemaless documents.
//!
//! A path is a dotted list of field names with bracketed list indices, e.g.
//! `spec.containers[0].name`. A bracket holding anything other than digits is
//! a field name, which is how keys containing dots are addressed:
//! `metadata.labels[app.kubernetes.io/name]`.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::{DecodeReason, Error, Result};

/// The schemaless substrate every resource is built on.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

/// Parse a path expression into segments.
pub fn parse(path: &str) -> Result<Vec<Segment>> {
    let invalid = |reason| Error::InvalidPath { path: path.to_string(), reason };
    if path.is_empty() {
        return Err(invalid("empty path"));
    }

    let mut segments = Vec::new();
    let mut field = String::new();
    let mut after_bracket = false;
    let mut dangling_dot = false;
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if field.is_empty() && !after_bracket {
                    return Err(invalid("empty field name"));
                }
                if !field.is_empty() {
                    segments.push(Segment::Field(std::mem::take(&mut field)));
                }
                after_bracket = false;
                dangling_dot = true;
            }
            '[' => {
                if !field.is_empty() {
                    segments.push(Segment::Field(std::mem::take(&mut field)));
                }
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    match c {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '[' => return Err(invalid("nested '['")),
                        c => inner.push(c),
                    }
                }
                if !closed {
                    return Err(invalid("unterminated '['"));
                }
                if inner.is_empty() {
                    return Err(invalid("empty brackets"));
                }
                if inner.bytes().all(|b| b.is_ascii_digit()) {
                    let idx = inner.parse().map_err(|_| invalid("index out of range"))?;
                    segments.push(Segment::Index(idx));
                } else {
                    segments.push(Segment::Field(inner));
                }
                after_bracket = true;
                dangling_dot = false;
            }
            ']' => return Err(invalid("unexpected ']'")),
            c => {
                if after_bracket {
                    return Err(invalid("expected '.' or '[' after ']'"));
                }
                field.push(c);
                dangling_dot = false;
            }
        }
    }
    if dangling_dot {
        return Err(invalid("trailing '.'"));
    }
    if !field.is_empty() {
        segments.push(Segment::Field(field));
    }
    Ok(segments)
}

/// Render segments back into path syntax.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
            Segment::Field(f) if f.contains(&['.', '[', ']'][..]) => {
                out.push('[');
                out.push_str(f);
                out.push(']');
            }
            Segment::Field(f) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(f);
            }
        }
    }
    out
}

/// Integer view of a JSON number: integers as is, floats truncated toward
/// zero (saturating at the i64 bounds).
pub fn integer_from(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
}

// Largest magnitude below which every integral f64 is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A whole float in the exactly representable range, as an integer.
pub fn exact_integer(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER).then(|| f as i64)
}

/// Copy `v` with whole floats rendered as integers, the way the protobuf
/// JSON mapping prints them.
pub fn integral_numbers(v: &Value) -> Value {
    match v {
        Value::Number(n) if n.is_f64() => match n.as_f64().and_then(exact_integer) {
            Some(i) => Value::Number(i.into()),
            None => v.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_numbers).collect()),
        Value::Object(m) => Value::Object(m.iter().map(|(k, v)| (k.clone(), integral_numbers(v))).collect()),
        _ => v.clone(),
    }
}

fn mismatch(path: String, expected: &'static str) -> Error {
    Error::TypeMismatch { path, expected }
}

fn root_not_a_list(path: &[Segment]) -> Error {
    Error::InvalidPath { path: render(path), reason: "the document root is an object, not a list" }
}

fn empty_container(next: &Segment) -> Value {
    match next {
        Segment::Field(_) => Value::Object(Map::new()),
        Segment::Index(_) => Value::Array(Vec::new()),
    }
}

fn lookup<'a>(root: &'a Document, segments: &[Segment]) -> Result<&'a Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(Error::InvalidPath { path: String::new(), reason: "empty path" });
    };
    let mut cur = match first {
        Segment::Field(f) => root.get(f).ok_or_else(|| Error::FieldNotFound(render(&segments[..1])))?,
        Segment::Index(_) => return Err(root_not_a_list(segments)),
    };
    for (i, seg) in rest.iter().enumerate() {
        let resolved = i + 1;
        cur = match seg {
            Segment::Field(f) => match cur {
                Value::Object(m) => m.get(f),
                _ => return Err(mismatch(render(&segments[..resolved]), "an object")),
            },
            Segment::Index(idx) => match cur {
                Value::Array(a) => a.get(*idx),
                _ => return Err(mismatch(render(&segments[..resolved]), "an array")),
            },
        }
        .ok_or_else(|| Error::FieldNotFound(render(&segments[..=resolved])))?;
    }
    Ok(cur)
}

fn lookup_mut<'a>(root: &'a mut Document, segments: &[Segment]) -> Result<&'a mut Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(Error::InvalidPath { path: String::new(), reason: "empty path" });
    };
    let mut cur = match first {
        Segment::Field(f) => root.get_mut(f).ok_or_else(|| Error::FieldNotFound(render(&segments[..1])))?,
        Segment::Index(_) => return Err(root_not_a_list(segments)),
    };
    for (i, seg) in rest.iter().enumerate() {
        let resolved = i + 1;
        cur = match seg {
            Segment::Field(f) => match cur {
                Value::Object(m) => m.get_mut(f),
                _ => return Err(mismatch(render(&segments[..resolved]), "an object")),
            },
            Segment::Index(idx) => match cur {
                Value::Array(a) => a.get_mut(*idx),
                _ => return Err(mismatch(render(&segments[..resolved]), "an array")),
            },
        }
        .ok_or_else(|| Error::FieldNotFound(render(&segments[..=resolved])))?;
    }
    Ok(cur)
}

// `cur` is the node at `all[..depth]`; `rest` is what remains below it.
fn set_into(cur: &mut Value, rest: &[Segment], all: &[Segment], depth: usize, value: Value) -> Result<()> {
    let Some((seg, below)) = rest.split_first() else {
        *cur = value;
        return Ok(());
    };
    if cur.is_null() {
        *cur = empty_container(seg);
    }
    match seg {
        Segment::Field(f) => match cur {
            Value::Object(m) => {
                if below.is_empty() {
                    m.insert(f.clone(), value);
                    return Ok(());
                }
                let next = m.entry(f.clone()).or_insert_with(|| empty_container(&below[0]));
                set_into(next, below, all, depth + 1, value)
            }
            _ => Err(mismatch(render(&all[..depth]), "an object")),
        },
        Segment::Index(idx) => match cur {
            Value::Array(a) => {
                if a.len() <= *idx {
                    a.resize(idx + 1, Value::Null);
                }
                set_into(&mut a[*idx], below, all, depth + 1, value)
            }
            _ => Err(mismatch(render(&all[..depth]), "an array")),
        },
    }
}

/// A document with path-based getters and setters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paved {
    object: Document,
}

impl Paved {
    pub fn new(object: Document) -> Self {
        Self { object }
    }

    pub fn as_document(&self) -> &Document {
        &self.object
    }

    pub fn as_document_mut(&mut self) -> &mut Document {
        &mut self.object
    }

    pub fn into_document(self) -> Document {
        self.object
    }

    pub fn get_value(&self, path: &str) -> Result<&Value> {
        lookup(&self.object, &parse(path)?)
    }

    /// Decode the value at `path` into `T`. Unknown members are ignored here;
    /// strict decoding lives in the wire bridge.
    ///
    /// Whole floats decode into integer fields, since documents built from
    /// protobuf structs hold every number as a float.
    pub fn get_value_into<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let v = integral_numbers(self.get_value(path)?);
        T::deserialize(v).map_err(|e| Error::decode(path, DecodeReason::Malformed(e.to_string())))
    }

    pub fn get_string(&self, path: &str) -> Result<String> {
        match self.get_value(path)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(mismatch(path.to_string(), "a string")),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        match self.get_value(path)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch(path.to_string(), "a bool")),
        }
    }

    pub fn get_number(&self, path: &str) -> Result<f64> {
        match self.get_value(path)? {
            Value::Number(n) => n.as_f64().ok_or_else(|| mismatch(path.to_string(), "a number")),
            _ => Err(mismatch(path.to_string(), "a number")),
        }
    }

    /// Read an integer at `path`.
    ///
    /// Documents decoded from JSON keep integers as integers, but documents
    /// built from protobuf structs hold every number as a float. Integers are
    /// returned as is; floats are truncated toward zero (9.9 -> 9, -9.9 -> -9).
    pub fn get_integer(&self, path: &str) -> Result<i64> {
        match self.get_value(path)? {
            Value::Number(n) => integer_from(n).ok_or_else(|| mismatch(path.to_string(), "an integer")),
            _ => Err(mismatch(path.to_string(), "an integer")),
        }
    }

    pub fn get_string_array(&self, path: &str) -> Result<Vec<String>> {
        match self.get_value(path)? {
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(mismatch(path.to_string(), "an array of strings")),
                })
                .collect(),
            _ => Err(mismatch(path.to_string(), "an array")),
        }
    }

    pub fn get_string_object(&self, path: &str) -> Result<BTreeMap<String, String>> {
        match self.get_value(path)? {
            Value::Object(m) => m
                .iter()
                .map(|(k, v)| match v {
                    Value::String(s) => Ok((k.clone(), s.clone())),
                    _ => Err(mismatch(path.to_string(), "an object of strings")),
                })
                .collect(),
            _ => Err(mismatch(path.to_string(), "an object")),
        }
    }

    /// Set `value` at `path`, creating intermediate objects (and lists, for
    /// index segments) as needed. Lists are padded with nulls.
    pub fn set_value<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        let segments = parse(path)?;
        let value = serde_json::to_value(value).map_err(|e| Error::encode(path, e))?;
        let Some((first, rest)) = segments.split_first() else {
            return Err(Error::InvalidPath { path: path.to_string(), reason: "empty path" });
        };
        let Segment::Field(name) = first else {
            return Err(root_not_a_list(&segments));
        };
        if rest.is_empty() {
            self.object.insert(name.clone(), value);
            return Ok(());
        }
        let slot = self.object.entry(name.clone()).or_insert_with(|| empty_container(&rest[0]));
        set_into(slot, rest, &segments, 1, value)
    }

    pub fn set_string(&mut self, path: &str, value: &str) -> Result<()> {
        self.set_value(path, value)
    }

    pub fn set_bool(&mut self, path: &str, value: bool) -> Result<()> {
        self.set_value(path, &value)
    }

    pub fn set_integer(&mut self, path: &str, value: i64) -> Result<()> {
        self.set_value(path, &value)
    }

    /// Remove the field or list element at `path`. Absent paths are a no-op.
    pub fn delete_field(&mut self, path: &str) -> Result<()> {
        let segments = parse(path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };
        if parents.is_empty() {
            return match last {
                Segment::Field(f) => {
                    self.object.remove(f);
                    Ok(())
                }
                Segment::Index(_) => Err(root_not_a_list(&segments)),
            };
        }
        let parent = match lookup_mut(&mut self.object, parents) {
            Ok(v) => v,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        };
        match (last, parent) {
            (Segment::Field(f), Value::Object(m)) => {
                m.remove(f);
            }
            (Segment::Index(i), Value::Array(a)) => {
                if *i < a.len() {
                    a.remove(*i);
                }
            }
            (Segment::Field(_), _) => return Err(mismatch(render(parents), "an object")),
            (Segment::Index(_), _) => return Err(mismatch(render(parents), "an array")),
        }
        Ok(())
    }
}

impl From<Document> for Paved {
    fn from(object: Document) -> Self {
        Self::new(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paved(v: Value) -> Paved {
        match v {
            Value::Object(m) => Paved::new(m),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn parse_handles_fields_indices_and_bracketed_keys() {
        assert_eq!(
            parse("spec.list[0].name").unwrap(),
            vec![
                Segment::Field("spec".into()),
                Segment::Field("list".into()),
                Segment::Index(0),
                Segment::Field("name".into()),
            ]
        );
        assert_eq!(
            parse("metadata.labels[app.io/name]").unwrap(),
            vec![
                Segment::Field("metadata".into()),
                Segment::Field("labels".into()),
                Segment::Field("app.io/name".into()),
            ]
        );
        assert_eq!(parse("a[1][2]").unwrap(), vec![Segment::Field("a".into()), Segment::Index(1), Segment::Index(2)]);
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for bad in ["", ".spec", "spec.", "spec..x", "spec[0", "spec]", "spec[]", "spec[0]x", "a[[0]]"] {
            let err = parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidPath { .. }), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn render_round_trips_through_parse() {
        for p in ["spec.list[0].name", "metadata.labels[app.io/name]", "a[1][2].b"] {
            assert_eq!(render(&parse(p).unwrap()), p);
        }
    }

    #[test]
    fn get_integer_accepts_ints_and_truncates_floats() {
        let p = paved(json!({
            "int": 9001,
            "float": 9.001,
            "exp": 10e3,
            "neg": -9.9,
            "whole": 9001.0,
            "str": "foo",
        }));
        assert_eq!(p.get_integer("int").unwrap(), 9001);
        assert_eq!(p.get_integer("float").unwrap(), 9);
        assert_eq!(p.get_integer("exp").unwrap(), 10000);
        assert_eq!(p.get_integer("neg").unwrap(), -9);
        assert_eq!(p.get_integer("whole").unwrap(), 9001);

        let err = p.get_integer("str").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("str"), "{err}");

        let err = p.get_integer("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn get_value_distinguishes_absent_from_wrong_kind() {
        let p = paved(json!({"spec": {"name": "x", "list": [1, 2]}}));
        assert!(p.get_value("spec.nope").unwrap_err().is_not_found());
        assert!(p.get_value("spec.list[5]").unwrap_err().is_not_found());

        let err = p.get_value("spec.name.first").unwrap_err();
        assert_eq!(err.to_string(), "spec.name: not an object");
        let err = p.get_value("spec[0]").unwrap_err();
        assert_eq!(err.to_string(), "spec: not an array");
    }

    #[test]
    fn typed_getters_check_kinds() {
        let p = paved(json!({
            "s": "v",
            "b": true,
            "arr": ["a", "b"],
            "mixed": ["a", 1],
            "obj": {"k": "v"},
            "badobj": {"k": 1},
        }));
        assert_eq!(p.get_string("s").unwrap(), "v");
        assert!(p.get_string("b").unwrap_err().is_type_mismatch());
        assert!(p.get_bool("b").unwrap());
        assert_eq!(p.get_string_array("arr").unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert!(p.get_string_array("mixed").unwrap_err().is_type_mismatch());
        assert_eq!(p.get_string_object("obj").unwrap().get("k").map(String::as_str), Some("v"));
        assert!(p.get_string_object("badobj").unwrap_err().is_type_mismatch());
        assert!(p.get_number("s").unwrap_err().is_type_mismatch());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut p = Paved::default();
        p.set_value("spec.widgets", &9001).unwrap();
        p.set_value("spec.list[2].name", "c").unwrap();
        p.set_value("metadata.labels[app.io/name]", "demo").unwrap();
        p.set_bool("spec.enabled", true).unwrap();

        assert_eq!(p.get_value("spec.widgets").unwrap(), &json!(9001));
        assert_eq!(p.get_string("spec.list[2].name").unwrap(), "c");
        assert_eq!(p.get_value("spec.list[0]").unwrap(), &Value::Null);
        assert_eq!(p.get_string("metadata.labels[app.io/name]").unwrap(), "demo");
        assert!(p.get_bool("spec.enabled").unwrap());
    }

    #[test]
    fn set_value_refuses_to_descend_through_scalars() {
        let mut p = paved(json!({"spec": {"name": "x", "list": []}}));
        let err = p.set_value("spec.name.first", "y").unwrap_err();
        assert_eq!(err.to_string(), "spec.name: not an object");
        let err = p.set_value("spec.list.first", "y").unwrap_err();
        assert_eq!(err.to_string(), "spec.list: not an object");
        // Nulls are replaced by the container the next segment needs.
        let mut p = paved(json!({"spec": null}));
        p.set_value("spec.x", &1).unwrap();
        assert_eq!(p.get_integer("spec.x").unwrap(), 1);
    }

    #[test]
    fn get_value_into_decodes_sub_documents() {
        #[derive(Deserialize, PartialEq, Debug)]
        struct Ref {
            name: String,
        }
        let p = paved(json!({"spec": {"ref": {"name": "a", "extra": true}}}));
        assert_eq!(p.get_value_into::<Ref>("spec.ref").unwrap(), Ref { name: "a".into() });
        assert!(matches!(p.get_value_into::<Vec<Ref>>("spec.ref").unwrap_err(), Error::Decode { .. }));
    }

    #[test]
    fn get_value_into_accepts_whole_floats_for_integers() {
        #[derive(Deserialize, PartialEq, Debug)]
        struct Spec {
            replicas: i64,
            ratio: f64,
            sizes: Vec<u32>,
        }
        let p = paved(json!({"spec": {"replicas": 3.0, "ratio": 1.5, "sizes": [1.0, 2.0]}}));
        assert_eq!(p.get_value_into::<Spec>("spec").unwrap(), Spec { replicas: 3, ratio: 1.5, sizes: vec![1, 2] });

        let p = paved(json!({"spec": {"replicas": 3.5, "ratio": 1.0, "sizes": []}}));
        assert!(matches!(p.get_value_into::<Spec>("spec").unwrap_err(), Error::Decode { .. }));
    }

    #[test]
    fn exact_integers_stop_at_two_to_the_53() {
        assert_eq!(exact_integer(-4.0), Some(-4));
        assert_eq!(exact_integer(4.25), None);
        assert_eq!(exact_integer(9_007_199_254_740_992.0), None);
        assert_eq!(integral_numbers(&json!({"a": [2.0, 2.5, "x"]})), json!({"a": [2, 2.5, "x"]}));
    }

    #[test]
    fn delete_field_removes_keys_and_elements() {
        let mut p = paved(json!({"spec": {"a": 1, "list": [1, 2, 3]}}));
        p.delete_field("spec.a").unwrap();
        p.delete_field("spec.list[1]").unwrap();
        p.delete_field("spec.absent.deeper").unwrap();
        assert_eq!(p.as_document(), paved(json!({"spec": {"list": [1, 3]}})).as_document());
    }
}
