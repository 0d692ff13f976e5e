#![forbid(unsafe_code)]

//! Node predicates by name, hierarchy path glob, or capability type.
//!
//! # Path globs
//!
//! A pattern is a `/`-separated list of segments anchored at a root:
//!
//! | Token | Matches |
//! |-------|---------|
//! | `?`   | exactly one character within a segment |
//! | `*`   | zero or more characters within a segment |
//! | `**`  | zero or more whole segments |
//!
//! `/**/Foo` therefore matches a root-level `Foo` as well as `Foo` at any
//! depth. A pattern without a leading `/` is treated as if it had one.

use std::fmt;

use crate::scene::{NodeId, Scene, hierarchy_path};

/// Predicate over a scene node.
pub trait Matcher: fmt::Debug {
    fn is_match(&self, scene: &dyn Scene, node: NodeId) -> bool;

    /// Human-readable description for diagnostics.
    fn describe(&self) -> String;
}

/// Exact name match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatcher {
    name: String,
}

impl NameMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for NameMatcher {
    fn is_match(&self, scene: &dyn Scene, node: NodeId) -> bool {
        scene.name(node) == Some(self.name.as_str())
    }

    fn describe(&self) -> String {
        format!("name={}", self.name)
    }
}

/// Hierarchy path glob match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    glob: PathGlob,
}

impl PathMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            glob: PathGlob::new(pattern),
        }
    }
}

impl Matcher for PathMatcher {
    fn is_match(&self, scene: &dyn Scene, node: NodeId) -> bool {
        self.glob.is_match(&hierarchy_path(scene, node))
    }

    fn describe(&self) -> String {
        format!("path={}", self.glob.pattern)
    }
}

/// Match by attached capability type, optionally refined by name and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityMatcher {
    type_name: String,
    name: Option<String>,
    path: Option<PathGlob>,
}

impl CapabilityMatcher {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
            path: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, pattern: &str) -> Self {
        self.path = Some(PathGlob::new(pattern));
        self
    }
}

impl Matcher for CapabilityMatcher {
    fn is_match(&self, scene: &dyn Scene, node: NodeId) -> bool {
        let has_type = scene
            .capabilities(node)
            .iter()
            .any(|c| c.enabled && c.type_name == self.type_name.as_str());
        if !has_type {
            return false;
        }
        if let Some(name) = &self.name
            && scene.name(node) != Some(name.as_str())
        {
            return false;
        }
        if let Some(glob) = &self.path
            && !glob.is_match(&hierarchy_path(scene, node))
        {
            return false;
        }
        true
    }

    fn describe(&self) -> String {
        let mut out = format!("type={}", self.type_name);
        if let Some(name) = &self.name {
            out.push_str(", name=");
            out.push_str(name);
        }
        if let Some(glob) = &self.path {
            out.push_str(", path=");
            out.push_str(&glob.pattern);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Glob
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// `**`
    AnyDepth,
    /// A single-segment pattern with `?` / `*` wildcards.
    Pattern(Vec<char>),
}

/// A compiled hierarchy path glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGlob {
    pattern: String,
    segments: Vec<Segment>,
}

impl PathGlob {
    pub fn new(pattern: &str) -> Self {
        let mut segments: Vec<Segment> = split_path(pattern)
            .map(|s| {
                if s == "**" {
                    Segment::AnyDepth
                } else {
                    Segment::Pattern(s.chars().collect())
                }
            })
            .collect();
        // `**/**` spans exactly what `**` does.
        segments.dedup_by(|a, b| *a == Segment::AnyDepth && *b == Segment::AnyDepth);
        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match a full `/`-separated path.
    pub fn is_match(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_path(path).collect();
        match_segments(&self.segments, &parts)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .filter(|s| !s.is_empty())
}

/// Segment-by-segment reachability over path prefixes.
///
/// `reach[j]` holds when the pattern consumed so far matches `parts[..j]`.
/// Each pattern segment is one pass over `parts`, so the whole match is
/// `O(segments * parts)` however many `**` the pattern holds.
fn match_segments(pattern: &[Segment], parts: &[&str]) -> bool {
    let mut reach = vec![false; parts.len() + 1];
    reach[0] = true;
    for segment in pattern {
        match segment {
            Segment::AnyDepth => {
                let mut seen = false;
                for r in reach.iter_mut() {
                    seen |= *r;
                    *r = seen;
                }
            }
            Segment::Pattern(glob) => {
                for j in (0..parts.len()).rev() {
                    reach[j + 1] = reach[j] && match_segment(glob, parts[j]);
                }
                reach[0] = false;
            }
        }
        if !reach.contains(&true) {
            return false;
        }
    }
    reach[parts.len()]
}

/// Wildcard match of one segment (`?` = one char, `*` = any run).
fn match_segment(glob: &[char], text: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let (mut g, mut t) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_text = 0usize;
    while t < text.len() {
        if g < glob.len() && (glob[g] == '?' || glob[g] == text[t]) {
            g += 1;
            t += 1;
        } else if g < glob.len() && glob[g] == '*' {
            star = Some(g);
            star_text = t;
            g += 1;
        } else if let Some(s) = star {
            g = s + 1;
            star_text += 1;
            t = star_text;
        } else {
            return false;
        }
    }
    glob[g..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::{Duration, Instant};

    fn glob(p: &str) -> PathGlob {
        PathGlob::new(p)
    }

    #[test]
    fn single_star_stays_within_segment() {
        assert!(glob("/A/*/C").is_match("/A/B/C"));
        assert!(!glob("/A/*/C").is_match("/A/B/B2/C"));
        assert!(!glob("/A/*/C").is_match("/A/C"));
    }

    #[test]
    fn double_star_matches_zero_segments() {
        assert!(glob("/**/C").is_match("/C"));
        assert!(glob("/**/C").is_match("/A/C"));
        assert!(glob("/**/C").is_match("/A/B/C"));
        assert!(!glob("/**/C").is_match("/A/B/D"));
    }

    #[test]
    fn double_star_in_middle() {
        assert!(glob("/A/**/C").is_match("/A/C"));
        assert!(glob("/A/**/C").is_match("/A/X/Y/C"));
        assert!(!glob("/A/**/C").is_match("/B/X/C"));
    }

    #[test]
    fn trailing_double_star_matches_everything_below() {
        assert!(glob("/A/**").is_match("/A"));
        assert!(glob("/A/**").is_match("/A/B/C"));
    }

    #[test]
    fn question_mark_is_one_char() {
        assert!(glob("/Butto?").is_match("/Button"));
        assert!(!glob("/Butto?").is_match("/Butto"));
        assert!(!glob("/Butto?").is_match("/Buttons"));
    }

    #[test]
    fn star_inside_segment() {
        assert!(glob("/Canvas/Btn*").is_match("/Canvas/Btn"));
        assert!(glob("/Canvas/Btn*").is_match("/Canvas/BtnStart"));
        assert!(glob("/Canvas/*Start").is_match("/Canvas/BtnStart"));
        assert!(!glob("/Canvas/*Start").is_match("/Canvas/StartBtn"));
        assert!(glob("/*a*b*").is_match("/xxaxxbxx"));
    }

    #[test]
    fn consecutive_double_stars_collapse() {
        let g = glob("/**/**/A/**/**");
        assert_eq!(g.segments.len(), 3);
        assert!(g.is_match("/A"));
        assert!(g.is_match("/X/Y/A/Z"));
        assert!(!g.is_match("/X/Y"));
    }

    #[test]
    fn many_double_stars_on_deep_miss_stay_fast() {
        let pattern = format!("{}/X", "/**/Q".repeat(10));
        let path: String = (0..30).map(|i| format!("/N{i}")).collect();
        let g = glob(&pattern);

        let started = Instant::now();
        assert!(!g.is_match(&path));
        assert!(!glob(&format!("{}/X", "/**".repeat(10))).is_match(&path));
        assert!(started.elapsed() < Duration::from_millis(100));

        let hit: String = (0..30).map(|i| format!("/N{i}/Q")).collect::<String>() + "/X";
        assert!(g.is_match(&hit));
    }

    #[test]
    fn anchored_to_root() {
        assert!(!glob("/B/C").is_match("/A/B/C"));
        assert!(glob("B/C").is_match("/B/C"));
    }

    #[test]
    fn describe_mentions_all_refinements() {
        let m = CapabilityMatcher::new("Button")
            .with_name("Ok")
            .with_path("/**/Dialog/*");
        assert_eq!(m.describe(), "type=Button, name=Ok, path=/**/Dialog/*");
        assert_eq!(NameMatcher::new("Start").describe(), "name=Start");
        assert_eq!(PathMatcher::new("/A/*").describe(), "path=/A/*");
    }
}
