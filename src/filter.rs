//! Resource ignore list.
//!
//! A name is ignored when any enabled pattern matches it. With no patterns
//! configured nothing is ignored.

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::error::{ClasspathError, Result};

const DEFAULT_IGNORED_RESOURCES: &[&str] = &[
    r"^META-INF/MANIFEST\.MF$",
    r"^META-INF/INDEX\.LIST$",
    r"^META-INF/[^/]*\.(SF|DSA|RSA|EC)$",
    r"^META-INF/SIG-[^/]*$",
    r"^META-INF/maven/.*$",
    r"^META-INF/plexus/.*$",
    r"^OSGI-INF/.*$",
    r"^(META-INF/)?[A-Z_-]*(LICENSE|LICENCE|License|license)(-[A-Za-z0-9]+(\.[0-9]+)*)?(\.txt|\.TXT|\.md|\.html)?$",
    r"^(META-INF/)?(NOTICE|Notice|notice)(\.txt|\.TXT|\.md)?$",
    r"^(META-INF/)?(README|ReadMe|readme)(\.txt|\.TXT|\.md|\.html)?$",
    r"^(META-INF/)?(DEPENDENCIES|DISCLAIMER|ASL2\.0|LGPL-3\.0)(\.txt|\.TXT)?$",
    r"^about\.html$",
    r"^overview\.html$",
    r"^plugin\.properties$",
    r"^plugin\.xml$",
    r"^(META-INF/versions/[0-9]+/)?module-info\.class$",
    r"^(.*/)?\.(git|svn|hg|bzr)/.*$",
    r"/$",
];

const REGEX_PREFIX: &str = "regex:";

#[derive(Debug, Clone)]
pub enum IgnorePattern {
    Exact(String),
    Glob(GlobMatcher),
    Regex(Regex),
}

impl IgnorePattern {
    /// `regex:<re>` is a regular expression, anything with glob metacharacters a glob,
    /// everything else a literal resource name.
    pub fn parse(pattern: &str) -> Result<Self> {
        if let Some(re) = pattern.strip_prefix(REGEX_PREFIX) {
            return Regex::new(re)
                .map(Self::Regex)
                .map_err(|e| invalid(pattern, e));
        }
        if pattern.contains(['*', '?', '[', '{']) {
            return Glob::new(pattern)
                .map(|g| Self::Glob(g.compile_matcher()))
                .map_err(|e| invalid(pattern, e));
        }
        if pattern.is_empty() {
            return Err(invalid(pattern, "empty pattern"));
        }
        Ok(Self::Exact(pattern.to_string()))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(literal) => literal == name,
            Self::Glob(matcher) => matcher.is_match(name),
            Self::Regex(re) => re.is_match(name),
        }
    }
}

fn invalid(pattern: &str, reason: impl ToString) -> ClasspathError {
    ClasspathError::InvalidIgnorePattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreFilter {
    pub fn new<S: AsRef<str>>(use_default_list: bool, ignored_resources: &[S]) -> Result<Self> {
        let mut patterns = Vec::new();
        if use_default_list {
            patterns.extend(default_patterns());
        }
        for raw in ignored_resources {
            patterns.push(IgnorePattern::parse(raw.as_ref())?);
        }
        Ok(Self { patterns })
    }

    /// Filter that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn should_ignore(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

fn default_patterns() -> impl Iterator<Item = IgnorePattern> {
    DEFAULT_IGNORED_RESOURCES
        .iter()
        .filter_map(|re| Regex::new(re).ok().map(IgnorePattern::Regex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_ignores_nothing() {
        let filter = IgnoreFilter::new::<&str>(false, &[]).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.should_ignore("com/x/Foo.class"));
        assert!(!filter.should_ignore("META-INF/MANIFEST.MF"));
        assert!(!IgnoreFilter::empty().should_ignore(""));
    }

    #[test]
    fn every_default_pattern_compiles() {
        assert_eq!(default_patterns().count(), DEFAULT_IGNORED_RESOURCES.len());
    }

    #[test]
    fn default_list_covers_jar_noise() {
        let filter = IgnoreFilter::new::<&str>(true, &[]).unwrap();
        for noisy in [
            "META-INF/MANIFEST.MF",
            "META-INF/INDEX.LIST",
            "META-INF/BCKEY.SF",
            "META-INF/BCKEY.DSA",
            "META-INF/maven/org.example/demo/pom.xml",
            "META-INF/LICENSE.txt",
            "LICENSE",
            "LICENSE-2.0.txt",
            "META-INF/LICENSE-junit.txt",
            "THIRD-PARTY-LICENSE",
            "license.md",
            "META-INF/NOTICE",
            "NOTICE.txt",
            "README.md",
            "about.html",
            "module-info.class",
            "META-INF/versions/11/module-info.class",
            ".git/HEAD",
            "sub/.svn/entries",
            "com/x/",
        ] {
            assert!(filter.should_ignore(noisy), "{noisy} should be ignored");
        }
        for kept in [
            "com/x/Foo.class",
            "log4j.properties",
            "META-INF/services/java.sql.Driver",
            "com/x/LicenseManager.class",
            "LicenseChecker.class",
            "License.class",
            "NoticeBoard.class",
            "READMEParser.class",
            "Readme.properties",
            "LICENSE-x.class",
        ] {
            assert!(!filter.should_ignore(kept), "{kept} should be kept");
        }
    }

    #[test]
    fn default_list_is_case_sensitive() {
        let filter = IgnoreFilter::new::<&str>(true, &[]).unwrap();
        assert!(!filter.should_ignore("meta-inf/manifest.mf"));
    }

    #[test]
    fn user_patterns_exact_glob_and_regex() {
        let filter =
            IgnoreFilter::new(false, &["log4j.properties", "com/y/*", "regex:^org/.*Test\\.class$"])
                .unwrap();
        assert!(filter.should_ignore("log4j.properties"));
        assert!(!filter.should_ignore("conf/log4j.properties"));
        assert!(filter.should_ignore("com/y/Bar.class"));
        assert!(!filter.should_ignore("com/x/Bar.class"));
        assert!(filter.should_ignore("org/a/FooTest.class"));
        assert!(!filter.should_ignore("org/a/Foo.class"));
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert!(matches!(
            IgnorePattern::parse("regex:(unclosed"),
            Err(ClasspathError::InvalidIgnorePattern { .. })
        ));
        assert!(IgnorePattern::parse("com/[x").is_err());
        assert!(IgnorePattern::parse("").is_err());
    }
}
