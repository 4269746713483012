use hemline::io::svg::SvgDrawOptions;
use hemline::util::DraftConfig;
use serde::{Deserialize, Serialize};

/// Configuration of the drafter CLI, loadable from a JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DrafterConfig {
    /// Geometry and layout settings
    #[serde(default)]
    pub draft: DraftConfig,
    /// SVG styling
    #[serde(default)]
    pub svg: SvgDrawOptions,
}
