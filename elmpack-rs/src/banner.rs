//! Provenance banner prepended to the minified script.

use serde::{Deserialize, Serialize};

/// Year printed in the copyright line of the banner.
pub const COPYRIGHT_YEAR: u16 = 2025;

/// Name, version and build information stamped on the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    pub name: String,
    pub version: String,
    pub additional_info: String,
    #[serde(default = "default_with_copyright")]
    pub with_copyright: bool,
}

fn default_with_copyright() -> bool {
    true
}

impl BuildDescriptor {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        additional_info: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            additional_info: additional_info.into(),
            with_copyright: true,
        }
    }

    pub fn with_copyright(mut self, with_copyright: bool) -> Self {
        self.with_copyright = with_copyright;
        self
    }

    /// Renders the banner comment.
    ///
    /// Downstream tooling matches on this text: the copyright variant prints
    /// the version as `v.<version>`, the plain variant as `v<version>`.
    pub fn banner(&self) -> String {
        let Self {
            name,
            version,
            additional_info,
            with_copyright,
        } = self;
        if *with_copyright {
            format!(
                "/***
 *
 *  {name} v.{version}
 *
 *  {additional_info}
 *
 *  Copyright (c) {COPYRIGHT_YEAR}
 *
 ***/"
            )
        } else {
            format!(
                "/***
 *
 *  {name} v{version}
 *
 *  {additional_info}
 *
 ***/"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_with_copyright() {
        let banner = BuildDescriptor::new("Widget", "3.2.1", "build 42").banner();
        assert_eq!(
            banner,
            "/***\n *\n *  Widget v.3.2.1\n *\n *  build 42\n *\n *  Copyright (c) 2025\n *\n ***/"
        );
    }

    #[test]
    fn test_banner_without_copyright() {
        let banner = BuildDescriptor::new("Widget", "3.2.1", "build 42")
            .with_copyright(false)
            .banner();
        assert_eq!(banner, "/***\n *\n *  Widget v3.2.1\n *\n *  build 42\n *\n ***/");
        assert!(!banner.contains("v.3.2.1"));
        assert!(!banner.contains("Copyright"));
    }

    #[test]
    fn test_descriptor_from_json() {
        let descriptor: BuildDescriptor = serde_json::from_value(serde_json::json!({
            "name": "Allocator",
            "version": "1.0.0",
            "additionalInfo": "nightly"
        }))
        .unwrap();
        assert_eq!(descriptor, BuildDescriptor::new("Allocator", "1.0.0", "nightly"));
    }
}
