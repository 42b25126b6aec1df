//! Input parameters of the example.
//!
//! Every parameter is described once in [`PARAMETERS`]; the same table
//! registers the command line options and resolves the parsed values,
//! including defaults.

use std::collections::HashMap;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::error::{Error, Result};
use crate::utils::{split_list, unique_creative_id};

pub const ACCOUNT_ID: &str = "account_id";
pub const ADVERTISER_NAME: &str = "advertiser_name";
pub const CREATIVE_ID: &str = "creative_id";
pub const DECLARED_ATTRIBUTES: &str = "declared_attributes";
pub const DECLARED_CLICK_URLS: &str = "declared_click_urls";
pub const DECLARED_RESTRICTED_CATEGORIES: &str = "declared_restricted_categories";
pub const DECLARED_VENDOR_IDS: &str = "declared_vendor_ids";
pub const VIDEO_URL: &str = "video_url";

pub const DEFAULT_VIDEO_URL: &str = "https://video.test.com/ads?id=123456&wprice=%%WINNING_PRICE%%";

#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    None,
    Value(&'static str),
    List(&'static [&'static str]),
    /// Evaluated once per run.
    Generated(fn() -> String),
}

impl DefaultValue {
    fn single(&self) -> String {
        match self {
            DefaultValue::None => String::new(),
            DefaultValue::Value(value) => value.to_string(),
            DefaultValue::List(values) => values.join(","),
            DefaultValue::Generated(generate) => generate(),
        }
    }

    fn list(&self) -> Vec<String> {
        match self {
            DefaultValue::None => Vec::new(),
            DefaultValue::Value(value) => split_list(value),
            DefaultValue::List(values) => values.iter().map(|v| v.to_string()).collect(),
            DefaultValue::Generated(generate) => vec![generate()],
        }
    }

    fn help(&self) -> Option<String> {
        match self {
            DefaultValue::None | DefaultValue::Generated(_) => None,
            DefaultValue::Value(value) => Some(value.to_string()),
            DefaultValue::List(values) => Some(values.join(",")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub display: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub is_array: bool,
    pub default: DefaultValue,
}

pub static PARAMETERS: &[ParamSpec] = &[
    ParamSpec {
        name: ACCOUNT_ID,
        short: Some('a'),
        display: "Account ID",
        description: "The resource ID of the buyers resource under which the creative is to be created.",
        required: true,
        is_array: false,
        default: DefaultValue::None,
    },
    ParamSpec {
        name: ADVERTISER_NAME,
        short: None,
        display: "Advertiser name",
        description: "The name of the company being advertised in the creative.",
        required: false,
        is_array: false,
        default: DefaultValue::Value("Test"),
    },
    ParamSpec {
        name: CREATIVE_ID,
        short: Some('c'),
        display: "Creative ID",
        description: "The user-specified creative ID. The maximum length of the creative ID is 128 bytes.",
        required: false,
        is_array: false,
        default: DefaultValue::Generated(unique_creative_id),
    },
    ParamSpec {
        name: DECLARED_ATTRIBUTES,
        short: None,
        display: "Declared attributes",
        description: "The creative attributes being declared. Specify each attribute separated by a comma.",
        required: false,
        is_array: true,
        default: DefaultValue::List(&["CREATIVE_TYPE_VAST_VIDEO"]),
    },
    ParamSpec {
        name: DECLARED_CLICK_URLS,
        short: None,
        display: "Declared click URLs",
        description: "The click-through URLs being declared. Specify each URL separated by a comma.",
        required: false,
        is_array: true,
        default: DefaultValue::List(&["http://test.com"]),
    },
    ParamSpec {
        name: DECLARED_RESTRICTED_CATEGORIES,
        short: None,
        display: "Declared restricted categories",
        description: "The restricted categories being declared. Specify each category separated by a comma.",
        required: false,
        is_array: true,
        default: DefaultValue::None,
    },
    ParamSpec {
        name: DECLARED_VENDOR_IDS,
        short: None,
        display: "Declared vendor IDs",
        description: "The vendor IDs being declared. Specify each ID separated by a comma or a space.",
        required: false,
        is_array: true,
        default: DefaultValue::None,
    },
    ParamSpec {
        name: VIDEO_URL,
        short: None,
        display: "Video URL",
        description: "The URL to fetch a video ad.",
        required: false,
        is_array: false,
        default: DefaultValue::Value(DEFAULT_VIDEO_URL),
    },
];

impl ParamSpec {
    pub fn arg(&self) -> Arg {
        let help = match self.default.help() {
            Some(default) => format!("{} [default: {default}]", self.description),
            None => self.description.to_string(),
        };

        let mut arg = Arg::new(self.name)
            .long(self.name)
            .value_name(self.display.to_uppercase().replace(' ', "_"))
            .help(help)
            .required(self.required);

        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        if self.is_array {
            arg.num_args(1..).action(ArgAction::Append)
        } else {
            arg.action(ArgAction::Set)
        }
    }

    fn resolve(&self, matches: &ArgMatches) -> Result<ParamValue> {
        // `try_get_many` tolerates a command that never registered this parameter
        let given = matches
            .try_get_many::<String>(self.name)
            .ok()
            .flatten()
            .map(|values| values.map(String::as_str).collect::<Vec<_>>());

        let value = match given {
            Some(values) if self.is_array => {
                ParamValue::List(values.into_iter().flat_map(split_list).collect())
            }
            Some(values) => ParamValue::Single(values.last().copied().unwrap_or_default().to_string()),
            None if self.required => return Err(Error::MissingParameter(self.name)),
            None if self.is_array => ParamValue::List(self.default.list()),
            None => ParamValue::Single(self.default.single()),
        };

        if self.required && value.is_empty() {
            return Err(Error::MissingParameter(self.name));
        }

        Ok(value)
    }
}

/// Register every parameter of [`PARAMETERS`] on `command`.
pub fn register(command: Command) -> Command {
    command.args(PARAMETERS.iter().map(ParamSpec::arg))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    fn is_empty(&self) -> bool {
        match self {
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::List(values) => values.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParamValues(HashMap<&'static str, ParamValue>);

impl ParamValues {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        PARAMETERS
            .iter()
            .map(|spec| spec.resolve(matches).map(|value| (spec.name, value)))
            .collect::<Result<HashMap<_, _>>>()
            .map(Self)
    }

    pub fn single(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(ParamValue::Single(value)) => value,
            _ => "",
        }
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(ParamValue::List(values)) => values,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParamValues {
        let matches = register(Command::new("test"))
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap();
        ParamValues::from_matches(&matches).unwrap()
    }

    #[test]
    fn every_parameter_has_a_unique_name() {
        let mut names: Vec<_> = PARAMETERS.iter().map(|spec| spec.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PARAMETERS.len());
    }

    #[test]
    fn missing_account_id_is_a_usage_error() {
        let err = register(Command::new("test"))
            .try_get_matches_from(["test"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn resolve_reports_missing_required_parameter() {
        // A command that does not enforce the requirement itself
        let matches = Command::new("test")
            .arg(Arg::new(ACCOUNT_ID).long(ACCOUNT_ID))
            .try_get_matches_from(["test"])
            .unwrap();
        let result = ParamValues::from_matches(&matches);
        assert!(matches!(result, Err(Error::MissingParameter(ACCOUNT_ID))));
    }

    #[test]
    fn empty_account_id_counts_as_missing() {
        let matches = register(Command::new("test"))
            .try_get_matches_from(["test", "--account_id", ""])
            .unwrap();
        assert!(matches!(
            ParamValues::from_matches(&matches),
            Err(Error::MissingParameter(ACCOUNT_ID))
        ));
    }

    #[test]
    fn defaults_are_used_when_options_are_omitted() {
        let values = parse(&["-a", "123"]);

        assert_eq!(values.single(ACCOUNT_ID), "123");
        assert_eq!(values.single(ADVERTISER_NAME), "Test");
        assert_eq!(values.single(VIDEO_URL), DEFAULT_VIDEO_URL);
        assert_eq!(values.list(DECLARED_ATTRIBUTES), ["CREATIVE_TYPE_VAST_VIDEO"]);
        assert_eq!(values.list(DECLARED_CLICK_URLS), ["http://test.com"]);
        assert!(values.list(DECLARED_RESTRICTED_CATEGORIES).is_empty());
        assert!(values.list(DECLARED_VENDOR_IDS).is_empty());
        assert!(values.single(CREATIVE_ID).starts_with("Video_Creative_"));
    }

    #[test]
    fn generated_creative_id_differs_across_runs() {
        let first = parse(&["-a", "1"]);
        let second = parse(&["-a", "1"]);
        assert_ne!(first.single(CREATIVE_ID), second.single(CREATIVE_ID));
    }

    #[test]
    fn array_options_are_split_in_order() {
        let values = parse(&[
            "--account_id",
            "7",
            "--declared_attributes",
            "A,B,C",
            "--declared_vendor_ids",
            "10",
            "20,30",
            "--declared_vendor_ids",
            "40",
        ]);

        assert_eq!(values.list(DECLARED_ATTRIBUTES), ["A", "B", "C"]);
        assert_eq!(values.list(DECLARED_VENDOR_IDS), ["10", "20", "30", "40"]);
    }

    #[test]
    fn short_aliases_are_registered() {
        let values = parse(&["-a", "42", "-c", "my_creative"]);
        assert_eq!(values.single(ACCOUNT_ID), "42");
        assert_eq!(values.single(CREATIVE_ID), "my_creative");
    }

    #[test]
    fn accessor_of_the_other_kind_is_empty() {
        let values = parse(&["-a", "42"]);
        assert_eq!(values.single(DECLARED_ATTRIBUTES), "");
        assert!(values.list(ACCOUNT_ID).is_empty());
        assert!(values.list("unknown").is_empty());
    }
}
