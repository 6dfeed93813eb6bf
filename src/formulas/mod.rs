//! Formula visualizations
//!
//! Each formula is a type implementing [`Formula`]. Rendering evaluates both
//! sides of the identity for one angle and returns a [`PresentationTree`], a
//! framework-neutral description that a renderer turns into text, SVG or
//! widgets. Formulas are kept in a [`FormulaRegistry`] keyed by id.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinates::{Angle, Point};
use crate::state::AppState;

pub mod builtin;

pub use builtin::BUILTIN_IDS;

/// Audience level of a formula
///
/// Levels are ordered: filtering by a level also exposes every easier one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    HighSchool,
    College,
    Graduate,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::HighSchool => write!(f, "high school"),
            Difficulty::College => write!(f, "college"),
            Difficulty::Graduate => write!(f, "graduate"),
        }
    }
}

/// One element of a rendered formula
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationNode {
    /// Explanatory text
    Text { text: String },
    /// A named numeric quantity
    Value { label: String, value: f64 },
    /// Numeric comparison of both sides of an identity
    Check {
        label: String,
        lhs: f64,
        rhs: f64,
        holds: bool,
    },
    /// A line segment in unit-circle coordinates, e.g. the sine leg
    Segment {
        label: String,
        from: Point,
        to: Point,
    },
}

/// Renderable description of a formula evaluated at one angle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationTree {
    pub formula_id: String,
    pub title: String,
    pub formula_text: String,
    pub angle: Angle,
    pub nodes: Vec<PresentationNode>,
}

impl PresentationTree {
    pub fn new(formula: &dyn Formula, angle: &Angle) -> Self {
        Self {
            formula_id: formula.id().to_string(),
            title: formula.name().to_string(),
            formula_text: formula.formula_text().to_string(),
            angle: *angle,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: PresentationNode) {
        self.nodes.push(node);
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.push(PresentationNode::Text { text: text.into() });
    }

    pub fn value(&mut self, label: impl Into<String>, value: f64) {
        self.push(PresentationNode::Value {
            label: label.into(),
            value,
        });
    }

    /// Adds a comparison node; `holds` is set when both sides agree within `tolerance`
    pub fn check(&mut self, label: impl Into<String>, lhs: f64, rhs: f64, tolerance: f64) {
        self.push(PresentationNode::Check {
            label: label.into(),
            lhs,
            rhs,
            holds: (lhs - rhs).abs() < tolerance,
        });
    }

    pub fn segment(&mut self, label: impl Into<String>, from: Point, to: Point) {
        self.push(PresentationNode::Segment {
            label: label.into(),
            from,
            to,
        });
    }

    /// Every check in the tree
    pub fn checks(&self) -> impl Iterator<Item = &PresentationNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node, PresentationNode::Check { .. }))
    }

    /// True when every check holds (vacuously true without checks)
    pub fn holds(&self) -> bool {
        self.checks()
            .all(|node| matches!(node, PresentationNode::Check { holds: true, .. }))
    }
}

/// A formula that can be rendered for any angle
pub trait Formula {
    /// Stable identifier, used to enable and disable the formula
    fn id(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    fn difficulty(&self) -> Difficulty;

    /// The identity in plain text, e.g. `sin²θ + cos²θ = 1`
    fn formula_text(&self) -> &'static str;

    fn render(&self, angle: &Angle) -> PresentationTree;
}

/// Ordered collection of formulas keyed by id
#[derive(Default)]
pub struct FormulaRegistry {
    formulas: BTreeMap<&'static str, Box<dyn Formula>>,
}

impl fmt::Debug for FormulaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaRegistry")
            .field("ids", &self.formulas.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormulaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in formula, checking identities within `identity_tolerance`
    pub fn with_builtins(identity_tolerance: f64) -> Self {
        let mut registry = Self::new();
        for formula in builtin::all(identity_tolerance) {
            registry.register(formula);
        }
        registry
    }

    /// Adds a formula, returning the one it replaced under the same id
    pub fn register(&mut self, formula: Box<dyn Formula>) -> Option<Box<dyn Formula>> {
        self.formulas.insert(formula.id(), formula)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Formula> {
        self.formulas.get(id).map(|formula| formula.as_ref())
    }

    /// Ids in registry order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.formulas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Formulas visible at `level`: that level and every easier one
    pub fn filter_by_difficulty(&self, level: Difficulty) -> Vec<&dyn Formula> {
        self.formulas
            .values()
            .filter(|formula| formula.difficulty() <= level)
            .map(|formula| formula.as_ref())
            .collect()
    }

    /// Renders the formulas the state has enabled at its difficulty, for its angle
    pub fn render_enabled(&self, state: &AppState) -> Vec<PresentationTree> {
        let angle = state.angle();
        self.filter_by_difficulty(state.difficulty())
            .into_iter()
            .filter(|formula| state.is_formula_enabled(formula.id()))
            .map(|formula| formula.render(&angle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IDENTITY_TOLERANCE;

    struct Constant;

    impl Formula for Constant {
        fn id(&self) -> &'static str {
            "pythagorean"
        }
        fn name(&self) -> &'static str {
            "Replacement"
        }
        fn difficulty(&self) -> Difficulty {
            Difficulty::Graduate
        }
        fn formula_text(&self) -> &'static str {
            "1 = 1"
        }
        fn render(&self, angle: &Angle) -> PresentationTree {
            let mut tree = PresentationTree::new(self, angle);
            tree.check("1 = 1", 1.0, 1.0, IDENTITY_TOLERANCE);
            tree
        }
    }

    #[test]
    fn test_difficulty_order() {
        assert!(Difficulty::HighSchool < Difficulty::College);
        assert!(Difficulty::College < Difficulty::Graduate);
        assert_eq!(Difficulty::default(), Difficulty::HighSchool);
    }

    #[test]
    fn test_filter_is_cumulative() {
        let registry = FormulaRegistry::with_builtins(IDENTITY_TOLERANCE);
        let high_school = registry.filter_by_difficulty(Difficulty::HighSchool);
        let college = registry.filter_by_difficulty(Difficulty::College);
        let graduate = registry.filter_by_difficulty(Difficulty::Graduate);
        assert_eq!(high_school.len(), 2);
        assert_eq!(college.len(), 4);
        assert_eq!(graduate.len(), registry.len());
        assert!(high_school
            .iter()
            .all(|formula| formula.difficulty() == Difficulty::HighSchool));
    }

    #[test]
    fn test_register_replaces_by_id() {
        let mut registry = FormulaRegistry::with_builtins(IDENTITY_TOLERANCE);
        let count = registry.len();
        let old = registry.register(Box::new(Constant)).unwrap();
        assert_eq!(old.name(), "Pythagorean identity");
        assert_eq!(registry.len(), count);
        assert_eq!(registry.get("pythagorean").unwrap().name(), "Replacement");
    }

    #[test]
    fn test_render_enabled_respects_state() {
        let registry = FormulaRegistry::with_builtins(IDENTITY_TOLERANCE);
        let mut state = AppState::new();
        let ids: Vec<String> = registry
            .render_enabled(&state)
            .into_iter()
            .map(|tree| tree.formula_id)
            .collect();
        assert_eq!(ids, vec!["pythagorean", "tangent_quotient"]);

        state.set_difficulty(Difficulty::Graduate);
        state.set_formula_enabled("euler", false);
        let trees = registry.render_enabled(&state);
        assert_eq!(trees.len(), registry.len() - 1);
        assert!(trees.iter().all(|tree| tree.formula_id != "euler"));
        assert!(trees.iter().all(PresentationTree::holds));
    }

    #[test]
    fn test_tree_serializes_with_kind_tag() {
        let mut tree = PresentationTree::new(&Constant, &Angle::ZERO);
        tree.text("hello");
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["nodes"][0]["kind"], "check");
        assert_eq!(json["nodes"][1]["kind"], "text");
        assert_eq!(json["nodes"][1]["text"], "hello");
    }
}
