//! # X!Tandem
//!
//! Spectrum, refinement and output settings of X!Tandem.
//!
//! Enablement:
//! - refinement drives the seven refinement options,
//! - noise suppression drives the minimum precursor mass,
//! - output proteins drives output sequences, which reads as "No" while disabled,
//! - any output results other than "all" enables the e-value cutoff.

use paramflux_inspector::{
    CrossFieldConstraint, EnablementRule, EnumValue, FieldDescriptor, ParameterSchema, RawValue, SchemaError,
    TypedValue,
};
use serde::{Deserialize, Serialize};

pub const HELP_URL: &str = "http://www.thegpm.org/TANDEM/api/";

/// Upper limit of the PTM complexity accepted by X!Tandem.
pub const MAX_PTM_COMPLEXITY: f64 = 12.0;

const REFINEMENT_DEPENDENTS: [&str; 7] = [
    "maximum_expectation_value_refinement",
    "refine_unanticipated_cleavages",
    "refine_semi",
    "potential_modifications_for_full_refinement",
    "refine_point_mutations",
    "refine_snaps",
    "refine_spectrum_synthesis",
];

named_choice! {
    pub enum OutputResults {
        All => "all",
        Valid => "valid",
        Stochastic => "stochastic",
    }
    default All
}

/// X!Tandem specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XtandemParameters {
    pub dynamic_range: f64,
    pub n_peaks: i32,
    pub min_fragment_mz: f64,
    pub min_peaks_per_spectrum: i32,
    pub use_noise_suppression: bool,
    pub min_precursor_mass: f64,
    pub protein_quick_acetyl: bool,
    pub quick_pyrolidone: bool,
    pub stp_bias: bool,
    pub protein_ptm_complexity: f64,
    pub refine: bool,
    pub maximum_expectation_value_refinement: f64,
    pub refine_unanticipated_cleavages: bool,
    pub refine_semi: bool,
    pub potential_modifications_for_full_refinement: bool,
    pub refine_point_mutations: bool,
    pub refine_snaps: bool,
    pub refine_spectrum_synthesis: bool,
    pub max_e_value: f64,
    pub output_results: OutputResults,
    pub output_proteins: bool,
    pub output_sequences: bool,
    pub output_spectra: bool,
    pub output_histograms: bool,
    pub skyline_path: Option<String>,
}

impl Default for XtandemParameters {
    fn default() -> Self {
        Self {
            dynamic_range: 100.0,
            n_peaks: 50,
            min_fragment_mz: 200.0,
            min_peaks_per_spectrum: 5,
            use_noise_suppression: false,
            min_precursor_mass: 500.0,
            protein_quick_acetyl: true,
            quick_pyrolidone: true,
            stp_bias: false,
            protein_ptm_complexity: 6.0,
            refine: true,
            maximum_expectation_value_refinement: 0.01,
            refine_unanticipated_cleavages: true,
            refine_semi: false,
            potential_modifications_for_full_refinement: false,
            refine_point_mutations: false,
            refine_snaps: true,
            refine_spectrum_synthesis: true,
            max_e_value: 100.0,
            output_results: OutputResults::All,
            output_proteins: true,
            output_sequences: false,
            output_spectra: true,
            output_histograms: false,
            skyline_path: None,
        }
    }
}

fn api(page: &str) -> String {
    format!("{HELP_URL}{page}.html")
}

pub fn schema() -> Result<ParameterSchema<XtandemParameters>, SchemaError> {
    ParameterSchema::<XtandemParameters>::builder("X!Tandem")
        .help_url(HELP_URL)
        // Spectrum
        .real(
            FieldDescriptor::real("dynamic_range", "Spectrum Dynamic Range").with_help(api("sdr")),
            |p| p.dynamic_range,
            |p, v| p.dynamic_range = v,
        )
        .integer(
            FieldDescriptor::integer("n_peaks", "Number of Peaks").with_help(api("stp")),
            |p| p.n_peaks,
            |p, v| p.n_peaks = v,
        )
        .real(
            FieldDescriptor::real("min_fragment_mz", "Minimum Fragment m/z").with_help(api("smfmz")),
            |p| p.min_fragment_mz,
            |p, v| p.min_fragment_mz = v,
        )
        .integer(
            FieldDescriptor::integer("min_peaks_per_spectrum", "Minimum Peaks").with_help(api("smp")),
            |p| p.min_peaks_per_spectrum,
            |p, v| p.min_peaks_per_spectrum = v,
        )
        .boolean(
            FieldDescriptor::boolean("use_noise_suppression", "Noise Suppression").with_help(api("suns")),
            |p| p.use_noise_suppression,
            |p, v| p.use_noise_suppression = v,
        )
        .real(
            FieldDescriptor::real("min_precursor_mass", "Minimum Precursor Mass").with_help(api("smpmh")),
            |p| p.min_precursor_mass,
            |p, v| p.min_precursor_mass = v,
        )
        // Protein
        .boolean(
            FieldDescriptor::boolean("protein_quick_acetyl", "Quick Acetyl").with_help(api("pqa")),
            |p| p.protein_quick_acetyl,
            |p, v| p.protein_quick_acetyl = v,
        )
        .boolean(
            FieldDescriptor::boolean("quick_pyrolidone", "Quick Pyrolidone").with_help(api("pqp")),
            |p| p.quick_pyrolidone,
            |p, v| p.quick_pyrolidone = v,
        )
        .boolean(
            FieldDescriptor::boolean("stp_bias", "stP Bias").with_help(api("pstpb")),
            |p| p.stp_bias,
            |p, v| p.stp_bias = v,
        )
        .real(
            FieldDescriptor::real("protein_ptm_complexity", "PTM Complexity")
                .with_help("http://www.thegpm.org/TANDEM/release.html"),
            |p| p.protein_ptm_complexity,
            |p, v| p.protein_ptm_complexity = v,
        )
        // Refinement
        .boolean(
            FieldDescriptor::boolean("refine", "Refinement").with_help(api("refine")),
            |p| p.refine,
            |p, v| p.refine = v,
        )
        .real(
            FieldDescriptor::real("maximum_expectation_value_refinement", "Maximum Valid Expectation Value")
                .with_help(api("refmvev")),
            |p| p.maximum_expectation_value_refinement,
            |p, v| p.maximum_expectation_value_refinement = v,
        )
        .boolean(
            FieldDescriptor::boolean("refine_unanticipated_cleavages", "Unanticipated Cleavage").with_help(api("ruc")),
            |p| p.refine_unanticipated_cleavages,
            |p, v| p.refine_unanticipated_cleavages = v,
        )
        .boolean(
            FieldDescriptor::boolean("refine_semi", "Semi-Enzymatic Cleavage").with_help(api("rcsemi")),
            |p| p.refine_semi,
            |p, v| p.refine_semi = v,
        )
        .boolean(
            FieldDescriptor::boolean(
                "potential_modifications_for_full_refinement",
                "Potential Modifications for Full Refinement",
            )
            .with_help(api("rupmffr")),
            |p| p.potential_modifications_for_full_refinement,
            |p, v| p.potential_modifications_for_full_refinement = v,
        )
        .boolean(
            FieldDescriptor::boolean("refine_point_mutations", "Point Mutations").with_help(api("rpm")),
            |p| p.refine_point_mutations,
            |p, v| p.refine_point_mutations = v,
        )
        .boolean(
            FieldDescriptor::boolean("refine_snaps", "snAPs").with_help(api("rsaps")),
            |p| p.refine_snaps,
            |p, v| p.refine_snaps = v,
        )
        .boolean(
            FieldDescriptor::boolean("refine_spectrum_synthesis", "Spectrum Synthesis").with_help(api("rss")),
            |p| p.refine_spectrum_synthesis,
            |p, v| p.refine_spectrum_synthesis = v,
        )
        // Output
        .real(
            FieldDescriptor::real("max_e_value", "E-value Cutoff").with_help(api("omvev")),
            |p| p.max_e_value,
            |p, v| p.max_e_value = v,
        )
        .choice(
            FieldDescriptor::choice("output_results", "Output Results").with_help(api("oresu")),
            OutputResults::codec()?,
            |p| p.output_results,
            |p, v| p.output_results = v,
        )
        .boolean(
            FieldDescriptor::boolean("output_proteins", "Output Proteins").with_help(api("oprot")),
            |p| p.output_proteins,
            |p, v| p.output_proteins = v,
        )
        .boolean(
            FieldDescriptor::boolean("output_sequences", "Output Sequences").with_help(api("osequ")),
            |p| p.output_sequences,
            |p, v| p.output_sequences = v,
        )
        .boolean(
            FieldDescriptor::boolean("output_spectra", "Output Spectra").with_help(api("ospec")),
            |p| p.output_spectra,
            |p, v| p.output_spectra = v,
        )
        .boolean(
            FieldDescriptor::boolean("output_histograms", "Output Histograms").with_help(api("ohist")),
            |p| p.output_histograms,
            |p, v| p.output_histograms = v,
        )
        .optional_text(
            FieldDescriptor::text("skyline_path", "Skyline Path").optional(),
            |p| p.skyline_path.clone(),
            |p, v| p.skyline_path = v,
        )
        .constraint(CrossFieldConstraint::numeric_ceiling(
            "ptm_complexity",
            "protein_ptm_complexity",
            MAX_PTM_COMPLEXITY,
        ))
        .rule(EnablementRule::enabled_when("refine", TypedValue::Boolean(true)).dependents(&REFINEMENT_DEPENDENTS))
        .rule(
            EnablementRule::enabled_when("use_noise_suppression", TypedValue::Boolean(true))
                .dependents(&["min_precursor_mass"]),
        )
        .rule(
            EnablementRule::enabled_when("output_proteins", TypedValue::Boolean(true))
                .dependents(&["output_sequences"])
                .forcing(RawValue::index(1)),
        )
        .rule(
            EnablementRule::enabled_unless(
                "output_results",
                TypedValue::Choice(EnumValue::name(OutputResults::All.as_str())),
            )
            .dependents(&["max_e_value"]),
        )
        .build()
}
