//! # Equation Registry
//!
//! Central registry of every equation used in the bolt calculations. Each
//! equation carries its formula, code reference and variable definitions so
//! that results can be audited against the standard.
//!
//! ## Usage
//!
//! ```rust
//! use bolt_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::NominalShearCapacity, "M20 8.8/S");
//!
//! let meta = Equation::NominalShearCapacity.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a design standard clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// AS 5100 Bridge design
    As5100 {
        part: u8,
        year: u16,
        clause: &'static str,
    },
    /// Fundamental geometry (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports.
    ///
    /// Clause numbers have not been checked against a published edition and
    /// are marked as indicative.
    pub fn citation(&self) -> String {
        match self {
            CodeReference::As5100 { part, year, clause } => {
                format!("AS 5100.{}:{} Clause {} (indicative)", part, year, clause)
            }
            CodeReference::Mechanics => "Fundamental Geometry".to_string(),
        }
    }
}

const AS5100_6_BOLTS: &str = "12.5";

fn as5100_6(clause: &'static str) -> CodeReference {
    CodeReference::As5100 {
        part: 6,
        year: 2017,
        clause,
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Bolt areas (Ac, Ao)
    SectionProperties,
    /// Reduction factors (kr, φ)
    ReductionFactors,
    /// Nominal and design capacities
    Capacities,
    /// Pitch and edge distance limits
    Detailing,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::ReductionFactors => "Reduction Factors",
            EquationCategory::Capacities => "Capacities",
            EquationCategory::Detailing => "Detailing Limits",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SectionProperties => 1,
            EquationCategory::ReductionFactors => 2,
            EquationCategory::Capacities => 3,
            EquationCategory::Detailing => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "d", "kr")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm", "MPa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the bolt calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// Ac = π(d-1)²/4
    MinorDiameterArea,
    /// Ao = πd²/4
    ShankArea,
    /// Piecewise kr
    LengthReductionFactor,
    /// Vf = 0.62 fuf kr (nn Ac + nx Ao)
    NominalShearCapacity,
    /// Ntf = Ac fuf
    NominalTensileCapacity,
    /// φN / 1000
    DesignCapacity,
    /// 2.5d
    MinimumPitch,
    /// min(200, 32d)
    MaximumPitch,
    /// 1.75d / 1.5d / 1.25d
    MinimumEdgeDistance,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::MinorDiameterArea => EquationMetadata {
                name: "Minor Diameter Area",
                description: "Cross-sectional area at the thread root, approximated with a 1 mm diameter allowance",
                formula_plain: "Ac = pi * (d - 1)^2 / 4",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Ac", "Minor diameter area", "mm²"),
                    Variable::new("d", "Nominal bolt diameter", "mm"),
                ],
                assumptions: vec!["Thread root diameter taken as d - 1 mm for all sizes"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "minor_diameter_area",
            },

            Equation::ShankArea => EquationMetadata {
                name: "Shank Area",
                description: "Cross-sectional area of the plain (unthreaded) shank",
                formula_plain: "Ao = pi * d^2 / 4",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("Ao", "Plain shank area", "mm²"),
                    Variable::new("d", "Nominal bolt diameter", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::SectionProperties,
                source_module: "equations/section.rs",
                source_function: "shank_area",
            },

            Equation::LengthReductionFactor => EquationMetadata {
                name: "Lap Connection Length Reduction Factor",
                description: "Reduction in bolt shear capacity for long bolted lap connections",
                formula_plain: "kr = 1.0 (L < 300); kr = 1.075 - L/4000 (300 <= L <= 1300); kr = 0.75 (L > 1300)",
                reference: as5100_6(AS5100_6_BOLTS),
                variables: vec![
                    Variable::new("kr", "Reduction factor", "-"),
                    Variable::new("L", "Connection length", "mm"),
                ],
                assumptions: vec!["Continuous at both breakpoints"],
                category: EquationCategory::ReductionFactors,
                source_module: "equations/bolt.rs",
                source_function: "length_reduction_factor",
            },

            Equation::NominalShearCapacity => EquationMetadata {
                name: "Nominal Bolt Shear Capacity",
                description: "Shear capacity summed over threaded and plain shear planes",
                formula_plain: "Vf = 0.62 * fuf * kr * (nn * Ac + nx * Ao)",
                reference: as5100_6(AS5100_6_BOLTS),
                variables: vec![
                    Variable::new("Vf", "Nominal shear capacity", "N"),
                    Variable::new("fuf", "Minimum tensile strength of bolt", "MPa"),
                    Variable::new("kr", "Length reduction factor", "-"),
                    Variable::new("nn", "Shear planes through threads", "-"),
                    Variable::new("nx", "Shear planes through shank", "-"),
                ],
                assumptions: vec!["Bearing-type connection (snug tight or tensioned bearing)"],
                category: EquationCategory::Capacities,
                source_module: "equations/bolt.rs",
                source_function: "nominal_shear_capacity",
            },

            Equation::NominalTensileCapacity => EquationMetadata {
                name: "Nominal Bolt Tension Capacity",
                description: "Tension capacity based on the minor diameter area",
                formula_plain: "Ntf = Ac * fuf",
                reference: as5100_6(AS5100_6_BOLTS),
                variables: vec![
                    Variable::new("Ntf", "Nominal tension capacity", "N"),
                    Variable::new("Ac", "Minor diameter area", "mm²"),
                    Variable::new("fuf", "Minimum tensile strength of bolt", "MPa"),
                ],
                assumptions: vec!["Independent of connection length and shear planes"],
                category: EquationCategory::Capacities,
                source_module: "equations/bolt.rs",
                source_function: "nominal_tensile_capacity",
            },

            Equation::DesignCapacity => EquationMetadata {
                name: "Design Capacity",
                description: "Nominal capacity reduced by the capacity factor and converted to kN",
                formula_plain: "phi * N / 1000, phi = 0.8",
                reference: as5100_6("3.2"),
                variables: vec![
                    Variable::new("phi", "Capacity reduction factor", "-"),
                    Variable::new("N", "Nominal capacity", "N"),
                ],
                assumptions: vec!["phi fixed at 0.8 for bolts in shear and tension"],
                category: EquationCategory::Capacities,
                source_module: "equations/bolt.rs",
                source_function: "design_capacity",
            },

            Equation::MinimumPitch => EquationMetadata {
                name: "Minimum Bolt Pitch",
                description: "Minimum centre-to-centre distance between bolts",
                formula_plain: "sp,min = 2.5 * d",
                reference: as5100_6("12.4"),
                variables: vec![
                    Variable::new("sp", "Pitch", "mm"),
                    Variable::new("d", "Nominal bolt diameter", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Detailing,
                source_module: "equations/detailing.rs",
                source_function: "min_pitch",
            },

            Equation::MaximumPitch => EquationMetadata {
                name: "Maximum Bolt Pitch",
                description: "Maximum centre-to-centre distance between bolts",
                formula_plain: "sp,max = min(200, 32 * d)",
                reference: as5100_6("12.4"),
                variables: vec![
                    Variable::new("sp", "Pitch", "mm"),
                    Variable::new("d", "Nominal bolt diameter", "mm"),
                ],
                assumptions: vec!["Thickness-based limits of the connected ply are not checked"],
                category: EquationCategory::Detailing,
                source_module: "equations/detailing.rs",
                source_function: "max_pitch",
            },

            Equation::MinimumEdgeDistance => EquationMetadata {
                name: "Minimum Edge Distance",
                description: "Minimum distance from bolt centre to the edge of a ply, by edge type",
                formula_plain: "ae = 1.75d (sheared), 1.5d (rolled plate / machine cut), 1.25d (rolled section edge)",
                reference: as5100_6("12.4"),
                variables: vec![
                    Variable::new("ae", "Edge distance", "mm"),
                    Variable::new("d", "Nominal bolt diameter", "mm"),
                ],
                assumptions: vec![],
                category: EquationCategory::Detailing,
                source_module: "equations/detailing.rs",
                source_function: "compute_detailing_limits",
            },
        }
    }

    /// Get all equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in display order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SectionProperties, ReductionFactors, Capacities, Detailing];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::MinorDiameterArea,
    Equation::ShankArea,
    Equation::LengthReductionFactor,
    Equation::NominalShearCapacity,
    Equation::NominalTensileCapacity,
    Equation::DesignCapacity,
    Equation::MinimumPitch,
    Equation::MaximumPitch,
    Equation::MinimumEdgeDistance,
];

// ============================================================================
// Usage Tracking
// ============================================================================

/// Record of an equation applied during a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where/why it was used
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md reference document.
///
/// # Example
///
/// ```rust
/// use bolt_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Bolt Capacity Equations Reference"));
/// assert!(markdown.contains("## Capacities"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Bolt Capacity Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Units: millimetres, MPa and Newtons in; kN out.

Clause numbers are indicative. Confirm them against the edition of AS 5100.6
in use before citing them in design documentation.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 9);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
        }

        let shear = Equation::NominalShearCapacity.metadata();
        assert!(shear.formula_plain.contains("0.62"));
    }

    #[test]
    fn test_code_reference_citation() {
        assert_eq!(as5100_6("12.5").citation(), "AS 5100.6:2017 Clause 12.5 (indicative)");
        assert_eq!(CodeReference::Mechanics.citation(), "Fundamental Geometry");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::NominalShearCapacity, "shear");
        tracker.record(Equation::DesignCapacity, "shear");
        tracker.record(Equation::DesignCapacity, "tension");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::NominalShearCapacity, Equation::DesignCapacity]
        );
    }

    #[test]
    fn test_every_category_populated() {
        for cat in Equation::all_categories() {
            assert!(!Equation::in_category(cat).is_empty(), "{:?} is empty", cat);
        }
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();
        assert!(markdown.contains("Auto-generated from source code"));
        assert!(markdown.contains("## Section Properties"));
        assert!(markdown.contains("## Detailing Limits"));
        assert!(markdown.contains("### Nominal Bolt Shear Capacity"));
        assert!(markdown.contains("AS 5100.6:2017 Clause 12.5 (indicative)"));
        assert!(markdown.contains("Clause numbers are indicative"));
        assert!(markdown.contains("**Total Equations:** 9"));
    }
}
