use super::value::ValueType;

/// Error raised while resolving parameters against a schema
///
/// These are caller mistakes, detected before any request is sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("The option \"{option}\" does not exist. Defined options are: \"{}\"", .defined.join("\", \""))]
    UndefinedOption {
        option: String,
        defined: Vec<String>,
    },

    #[error("The option \"{option}\" is expected to be of type \"{}\", but is of type \"{actual}\"", join_types(.expected))]
    InvalidOptionType {
        option: String,
        expected: Vec<ValueType>,
        actual: ValueType,
    },

    #[error("The option \"{option}\" with value {value} is invalid")]
    InvalidOptionValue { option: String, value: String },

    #[error("The required option \"{option}\" is missing")]
    MissingRequiredOption { option: String },
}

impl OptionsError {
    /// Name of the option that caused the failure
    pub fn option(&self) -> &str {
        match self {
            OptionsError::UndefinedOption { option, .. }
            | OptionsError::InvalidOptionType { option, .. }
            | OptionsError::InvalidOptionValue { option, .. }
            | OptionsError::MissingRequiredOption { option } => option,
        }
    }
}

fn join_types(types: &[ValueType]) -> String {
    types
        .iter()
        .map(ValueType::to_string)
        .collect::<Vec<_>>()
        .join("\" or \"")
}
