//! Framework detection from declared dependencies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Framework {
    React,
    Vue,
    Angular,
    Svelte,
    Solid,
    Next,
    Nuxt,
    Gatsby,
    Vite,
    Astro,
    Remix,
}

impl Framework {
    pub fn name(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Svelte => "svelte",
            Framework::Solid => "solid",
            Framework::Next => "next",
            Framework::Nuxt => "nuxt",
            Framework::Gatsby => "gatsby",
            Framework::Vite => "vite",
            Framework::Astro => "astro",
            Framework::Remix => "remix",
        }
    }
}

/// Signature table, priority order. Meta-frameworks come before the base
/// frameworks they bundle so that a manifest declaring both `next` and
/// `react` detects `next`. Table order is significant.
const SIGNATURES: &[(Framework, &[&str])] = &[
    (Framework::Next, &["next"]),
    (Framework::Nuxt, &["nuxt"]),
    (Framework::Gatsby, &["gatsby"]),
    (Framework::Remix, &["@remix-run/react"]),
    (Framework::Astro, &["astro"]),
    (Framework::React, &["react", "react-dom"]),
    (Framework::Vue, &["vue"]),
    (Framework::Angular, &["@angular/core"]),
    (Framework::Svelte, &["svelte"]),
    (Framework::Solid, &["solid-js"]),
    (Framework::Vite, &["vite"]),
];

/// Detect the UI framework from a parsed package manifest. Pure function
/// over the union of `dependencies` and `devDependencies`; returns the first
/// match from the signature table.
pub fn detect_framework(package_json: &serde_json::Value) -> Option<Framework> {
    let has_dep = |name: &str| -> bool {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| package_json.get(section).and_then(|d| d.get(name)).is_some())
    };

    for (framework, packages) in SIGNATURES {
        if packages.iter().any(|pkg| has_dep(pkg)) {
            return Some(*framework);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_react() {
        let pkg = json!({ "dependencies": { "react": "18.0.0" } });
        assert_eq!(detect_framework(&pkg), Some(Framework::React));
    }

    #[test]
    fn test_react_dom_counts_as_react() {
        let pkg = json!({ "devDependencies": { "react-dom": "18.0.0" } });
        assert_eq!(detect_framework(&pkg), Some(Framework::React));
    }

    #[test]
    fn test_next_takes_priority_over_react() {
        let pkg = json!({ "dependencies": { "next": "1.0.0", "react": "1.0.0" } });
        assert_eq!(detect_framework(&pkg), Some(Framework::Next));
    }

    #[test]
    fn test_no_framework() {
        let pkg = json!({ "dependencies": { "lodash": "4.0.0" } });
        assert_eq!(detect_framework(&pkg), None);
        assert_eq!(detect_framework(&json!({})), None);
    }

    #[test]
    fn test_remix_scoped_package() {
        let pkg = json!({ "dependencies": { "@remix-run/react": "2.0.0" } });
        assert_eq!(detect_framework(&pkg), Some(Framework::Remix));
    }
}
