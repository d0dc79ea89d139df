//! Declarative option schemas and the resolver that applies them

use super::error::OptionsError;
use super::value::{format_datetime, parse_datetime, OptionValue, Params, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named structural check applied to an option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Value is an array whose every element is an integer
    AllIntegers,
    /// Value is an integer greater than or equal to the bound
    AtLeast(i64),
    /// Value is an integer within the inclusive range
    Between(i64, i64),
}

impl Validator {
    pub fn check(&self, value: &OptionValue) -> bool {
        match self {
            Validator::AllIntegers => match value {
                OptionValue::Array(items) => {
                    let integers = items.iter().filter(|v| v.as_integer().is_some()).count();
                    integers == items.len()
                }
                _ => false,
            },
            Validator::AtLeast(min) => value.as_integer().is_some_and(|n| n >= *min),
            Validator::Between(min, max) => value
                .as_integer()
                .is_some_and(|n| (*min..=*max).contains(&n)),
        }
    }
}

/// Accepted values for an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedValues {
    Literals(Vec<OptionValue>),
    Predicate(Validator),
}

impl AllowedValues {
    pub fn permits(&self, value: &OptionValue) -> bool {
        match self {
            AllowedValues::Literals(literals) => literals.contains(value),
            AllowedValues::Predicate(validator) => validator.check(value),
        }
    }
}

/// Pure transformation applied to a value once it has been validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    /// Format a timestamp as `YYYY-MM-DDTHH:MM:SS+HH:MM`
    Iso8601,
}

impl Normalizer {
    pub fn apply(&self, value: OptionValue) -> OptionValue {
        match self {
            Normalizer::Iso8601 => match value {
                OptionValue::DateTime(dt) => OptionValue::String(format_datetime(&dt)),
                OptionValue::String(s) => match parse_datetime(&s) {
                    Some(dt) => OptionValue::String(format_datetime(&dt)),
                    None => OptionValue::String(s),
                },
                other => other,
            },
        }
    }
}

/// Constraints for a single option
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Empty means any type is accepted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_types: Vec<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<AllowedValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalizer: Option<Normalizer>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
}

impl OptionSpec {
    /// An optional option with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, value_type: ValueType) -> Self {
        self.allowed_types.push(value_type);
        self
    }

    pub fn one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        self.allowed_values = Some(AllowedValues::Literals(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn validated_by(mut self, validator: Validator) -> Self {
        self.allowed_values = Some(AllowedValues::Predicate(validator));
        self
    }

    pub fn normalized_by(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate then normalize a single value.
    ///
    /// The type check runs first so a mistyped value never reaches the
    /// predicate or the normalizer.
    fn resolve_value(&self, name: &str, value: &OptionValue) -> Result<OptionValue, OptionsError> {
        if !self.allowed_types.is_empty() && !self.allowed_types.iter().any(|t| t.matches(value)) {
            return Err(OptionsError::InvalidOptionType {
                option: name.to_string(),
                expected: self.allowed_types.clone(),
                actual: value.value_type(),
            });
        }

        if let Some(allowed) = &self.allowed_values {
            if !allowed.permits(value) {
                return Err(OptionsError::InvalidOptionValue {
                    option: name.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(match self.normalizer {
            Some(normalizer) => normalizer.apply(value.clone()),
            None => value.clone(),
        })
    }
}

/// The set of options recognized by one API call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSchema {
    options: BTreeMap<String, OptionSpec>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option, replacing any previous declaration with the same name.
    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    /// Declare an unconstrained optional option.
    pub fn define(self, name: impl Into<String>) -> Self {
        self.option(name, OptionSpec::new())
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn defined_options(&self) -> Vec<String> {
        self.options.keys().cloned().collect()
    }

    pub fn resolve(&self, input: &Params) -> Result<ResolvedParameters, OptionsError> {
        resolve(self, input)
    }
}

/// Parameters that passed a schema, ready to be sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedParameters(Params);

impl ResolvedParameters {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_params(&self) -> &Params {
        &self.0
    }

    pub fn into_params(self) -> Params {
        self.0
    }
}

/// Resolve caller input against a schema.
///
/// Keys are processed in name order and the first failure is returned.
/// Defaults are filled in only for options that declare one; required
/// options are checked last.
pub fn resolve(schema: &OptionSchema, input: &Params) -> Result<ResolvedParameters, OptionsError> {
    let mut resolved = Params::new();

    for (name, value) in input {
        let spec = schema
            .get(name)
            .ok_or_else(|| OptionsError::UndefinedOption {
                option: name.clone(),
                defined: schema.defined_options(),
            })?;

        resolved.insert(name.clone(), spec.resolve_value(name, value)?);
    }

    for (name, spec) in &schema.options {
        if resolved.contains_key(name) {
            continue;
        }
        if let Some(default) = &spec.default {
            let value = match spec.normalizer {
                Some(normalizer) => normalizer.apply(default.clone()),
                None => default.clone(),
            };
            resolved.insert(name.clone(), value);
        } else if spec.required {
            return Err(OptionsError::MissingRequiredOption {
                option: name.clone(),
            });
        }
    }

    Ok(ResolvedParameters(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use chrono::{TimeZone, Utc};

    fn state_schema() -> OptionSchema {
        OptionSchema::new().option("state", OptionSpec::new().one_of(["opened", "closed"]))
    }

    fn iids_schema() -> OptionSchema {
        OptionSchema::new().option(
            "iids",
            OptionSpec::new()
                .of_type(ValueType::Array)
                .validated_by(Validator::AllIntegers),
        )
    }

    fn created_after_schema() -> OptionSchema {
        OptionSchema::new().option(
            "created_after",
            OptionSpec::new()
                .of_type(ValueType::DateTime)
                .normalized_by(Normalizer::Iso8601),
        )
    }

    // ============================================================================
    // resolve tests
    // ============================================================================

    #[test]
    fn test_resolve_literal_value() {
        let resolved = resolve(&state_schema(), &params! { "state" => "opened" }).unwrap();
        assert_eq!(resolved.into_params(), params! { "state" => "opened" });
    }

    #[test]
    fn test_resolve_rejects_value_outside_literals() {
        let err = resolve(&state_schema(), &params! { "state" => "merged" }).unwrap_err();
        assert_eq!(
            err,
            OptionsError::InvalidOptionValue {
                option: "state".to_string(),
                value: "\"merged\"".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_undefined_option() {
        let err = resolve(&state_schema(), &params! { "colour" => "red" }).unwrap_err();
        assert_eq!(
            err,
            OptionsError::UndefinedOption {
                option: "colour".to_string(),
                defined: vec!["state".to_string()],
            }
        );
    }

    #[test]
    fn test_resolve_iids_all_integers() {
        let resolved = resolve(&iids_schema(), &params! { "iids" => vec![1, 2, 3] }).unwrap();
        assert_eq!(resolved.into_params(), params! { "iids" => vec![1, 2, 3] });
    }

    #[test]
    fn test_resolve_iids_with_string_element() {
        let mixed = OptionValue::Array(vec![OptionValue::from(1), OptionValue::from("x")]);
        let err = resolve(&iids_schema(), &params! { "iids" => mixed }).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidOptionValue { ref option, .. } if option == "iids"));
    }

    #[test]
    fn test_resolve_iids_not_an_array() {
        let err = resolve(&iids_schema(), &params! { "iids" => 1 }).unwrap_err();
        assert_eq!(
            err,
            OptionsError::InvalidOptionType {
                option: "iids".to_string(),
                expected: vec![ValueType::Array],
                actual: ValueType::Integer,
            }
        );
    }

    #[test]
    fn test_resolve_empty_array_is_all_integers() {
        let empty: Vec<i64> = Vec::new();
        assert!(resolve(&iids_schema(), &params! { "iids" => empty }).is_ok());
    }

    #[test]
    fn test_resolve_datetime_normalized() {
        let created = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let resolved =
            resolve(&created_after_schema(), &params! { "created_after" => created }).unwrap();
        assert_eq!(
            resolved.get("created_after"),
            Some(&OptionValue::from("2018-01-01T00:00:00+00:00"))
        );
    }

    #[test]
    fn test_resolve_type_check_precedes_normalizer() {
        let err =
            resolve(&created_after_schema(), &params! { "created_after" => "last week" }).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidOptionType { actual: ValueType::String, .. }));
    }

    #[test]
    fn test_resolve_type_check_precedes_predicate() {
        // A string would also fail AllIntegers; the type error must win.
        let err = resolve(&iids_schema(), &params! { "iids" => "1,2" }).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidOptionType { .. }));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let schema = created_after_schema()
            .option("state", OptionSpec::new().one_of(["opened", "closed"]))
            .option(
                "iids",
                OptionSpec::new()
                    .of_type(ValueType::Array)
                    .validated_by(Validator::AllIntegers),
            );
        let created = Utc.with_ymd_and_hms(2018, 1, 31, 12, 0, 0).unwrap();
        let input = params! {
            "created_after" => created,
            "state" => "closed",
            "iids" => vec![4, 5],
        };

        let once = resolve(&schema, &input).unwrap();
        let twice = resolve(&schema, once.as_params()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_empty_input_yields_empty_output() {
        let resolved = resolve(&state_schema(), &Params::new()).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_resolve_missing_required_option() {
        let schema = OptionSchema::new()
            .option("body", OptionSpec::new().of_type(ValueType::String).required())
            .define("confidential");
        let err = resolve(&schema, &params! { "confidential" => true }).unwrap_err();
        assert_eq!(
            err,
            OptionsError::MissingRequiredOption {
                option: "body".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_default_only_when_declared() {
        let schema = OptionSchema::new()
            .option("per_page", OptionSpec::new().with_default(20))
            .define("search");
        let resolved = resolve(&schema, &Params::new()).unwrap();
        assert_eq!(resolved.into_params(), params! { "per_page" => 20 });
    }

    #[test]
    fn test_resolve_multiple_allowed_types() {
        let schema = OptionSchema::new().option(
            "milestone",
            OptionSpec::new()
                .of_type(ValueType::String)
                .of_type(ValueType::Integer),
        );
        assert!(resolve(&schema, &params! { "milestone" => "v1" }).is_ok());
        assert!(resolve(&schema, &params! { "milestone" => 3 }).is_ok());
        assert!(resolve(&schema, &params! { "milestone" => true }).is_err());
    }

    // ============================================================================
    // Validator tests
    // ============================================================================

    #[test]
    fn test_validator_bounds() {
        assert!(Validator::AtLeast(1).check(&OptionValue::from(1)));
        assert!(!Validator::AtLeast(1).check(&OptionValue::from(0)));
        assert!(Validator::Between(1, 100).check(&OptionValue::from(100)));
        assert!(!Validator::Between(1, 100).check(&OptionValue::from(101)));
        assert!(!Validator::Between(1, 100).check(&OptionValue::from("50")));
    }

    // ============================================================================
    // Serialization tests
    // ============================================================================

    #[test]
    fn test_schema_serializes_as_data() {
        let json = serde_json::to_value(iids_schema()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "iids": {
                    "allowed_types": ["array"],
                    "allowed_values": {"predicate": "all_integers"},
                    "required": false
                }
            })
        );

        let back: OptionSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, iids_schema());
    }
}
