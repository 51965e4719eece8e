use testscan_core::{FrameworkPriority, Language};

use crate::config_scope::ConfigParser;
use crate::extractors::Extractor;
use crate::signals::Matcher;

/// One framework's detection-and-extraction strategy (§3 "Framework Definition").
///
/// Built once by a strategy module (`crate::extractors::<framework>::definition()`)
/// and registered into the process-wide [`super::FrameworkRegistry`]. Everything
/// here is read-only for the lifetime of a scan.
pub struct FrameworkDefinition {
    pub name: &'static str,
    pub languages: &'static [Language],
    pub matchers: Vec<Box<dyn Matcher>>,
    pub config_parser: Option<Box<dyn ConfigParser>>,
    pub extractor: Box<dyn Extractor>,
    pub priority: FrameworkPriority,
}
