//! # Comet
//!
//! Advanced settings of the Comet search engine.

use paramflux_inspector::{
    AccessError, Accessor, CrossFieldConstraint, EnablementRule, EnumCodec, EnumValue, FieldDescriptor,
    ParameterSchema, SchemaError, TypedValue, ValueShape,
};
use serde::{Deserialize, Serialize};

pub const HELP_URL: &str = "http://comet-ms.sourceforge.net";

named_choice! {
    /// Output file format written by Comet.
    pub enum CometOutputFormat {
        PepXml => "PepXML",
        Sqt => "SQT",
        Txt => "TXT",
        Percolator => "Percolator",
        MzIdentMl => "mzIdentML",
    }
    default PepXml
}

/// Comet specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CometParameters {
    pub number_of_spectrum_matches: i32,
    pub max_variable_mods: i32,
    pub require_variable_mods: bool,
    pub min_peaks: i32,
    pub min_peak_intensity: f64,
    /// 0: no, 1: yes, 2: yes and charge reduced.
    pub remove_precursor: i32,
    pub remove_precursor_tolerance: f64,
    pub lower_clear_mz_range: f64,
    pub upper_clear_mz_range: f64,
    /// Comet enzyme code: 1 semi-specific, 2 full, 8 and 9 unspecific at one terminus.
    pub enzyme_type: i32,
    pub isotope_correction: i32,
    pub min_precursor_mass: f64,
    pub max_precursor_mass: f64,
    pub max_fragment_charge: i32,
    pub remove_methionine: bool,
    pub batch_size: i32,
    /// Score on summed fragment intensities only, without flanking peaks.
    pub theoretical_fragment_ions_sum_only: bool,
    pub fragment_bin_offset: f64,
    pub output_format: CometOutputFormat,
    pub print_expect_score: bool,
}

impl Default for CometParameters {
    fn default() -> Self {
        Self {
            number_of_spectrum_matches: 10,
            max_variable_mods: 10,
            require_variable_mods: false,
            min_peaks: 10,
            min_peak_intensity: 0.0,
            remove_precursor: 0,
            remove_precursor_tolerance: 1.5,
            lower_clear_mz_range: 0.0,
            upper_clear_mz_range: 0.0,
            enzyme_type: 2,
            isotope_correction: 1,
            min_precursor_mass: 600.0,
            max_precursor_mass: 5000.0,
            max_fragment_charge: 3,
            remove_methionine: false,
            batch_size: 0,
            theoretical_fragment_ions_sum_only: false,
            fragment_bin_offset: 0.0,
            output_format: CometOutputFormat::PepXml,
            print_expect_score: true,
        }
    }
}

/// Enzyme type combo: view position to Comet enzyme code.
pub fn enzyme_type_codec() -> Result<EnumCodec, SchemaError> {
    EnumCodec::codes(&[
        (2, "Full-enzyme"),
        (1, "Semi-specific"),
        (8, "Unspecific Peptide C-term"),
        (9, "Unspecific Peptide N-term"),
    ])
}

/// The correlation score combo lists the flanking variant first, so its
/// index is the inverse of the Yes/No convention.
fn correlation_score_field() -> Result<(EnumCodec, Accessor<CometParameters>), SchemaError> {
    let codec = EnumCodec::identity(&["Summed Intensities + Flanking", "Summed Intensities"])?;
    let accessor = Accessor::new(
        ValueShape::Choice,
        false,
        |p: &CometParameters| TypedValue::Choice(EnumValue::Code(i64::from(p.theoretical_fragment_ions_sum_only))),
        |p: &mut CometParameters, value: &TypedValue| match value {
            TypedValue::Choice(EnumValue::Code(0)) => {
                p.theoretical_fragment_ions_sum_only = false;
                Ok(())
            }
            TypedValue::Choice(EnumValue::Code(1)) => {
                p.theoretical_fragment_ions_sum_only = true;
                Ok(())
            }
            TypedValue::Choice(other) => Err(AccessError::UnknownChoice(other.clone())),
            other => Err(AccessError::TypeMismatch {
                expected: "choice",
                found: other.type_name(),
            }),
        },
    );
    Ok((codec, accessor))
}

pub fn schema() -> Result<ParameterSchema<CometParameters>, SchemaError> {
    let (score_codec, score_accessor) = correlation_score_field()?;

    ParameterSchema::<CometParameters>::builder("Comet")
        .help_url(HELP_URL)
        .integer(
            FieldDescriptor::integer("number_of_spectrum_matches", "Number of Spectrum Matches"),
            |p| p.number_of_spectrum_matches,
            |p, v| p.number_of_spectrum_matches = v,
        )
        .integer(
            FieldDescriptor::integer("max_variable_mods", "Maximum Number of PTMs"),
            |p| p.max_variable_mods,
            |p, v| p.max_variable_mods = v,
        )
        .boolean(
            FieldDescriptor::boolean("require_variable_mods", "Require Variable PTMs"),
            |p| p.require_variable_mods,
            |p, v| p.require_variable_mods = v,
        )
        .integer(
            FieldDescriptor::integer("min_peaks", "Minimum Number of Peaks"),
            |p| p.min_peaks,
            |p, v| p.min_peaks = v,
        )
        .real(
            FieldDescriptor::real("min_peak_intensity", "Minimum Peak Intensity"),
            |p| p.min_peak_intensity,
            |p, v| p.min_peak_intensity = v,
        )
        .choice(
            FieldDescriptor::choice("remove_precursor", "Remove Precursor Peak"),
            EnumCodec::identity(&["No", "Yes", "Yes + Charge Reduced"])?,
            |p| p.remove_precursor,
            |p, v| p.remove_precursor = v,
        )
        .real(
            FieldDescriptor::real("remove_precursor_tolerance", "Remove Precursor Peak Tolerance"),
            |p| p.remove_precursor_tolerance,
            |p, v| p.remove_precursor_tolerance = v,
        )
        .real(
            FieldDescriptor::real("lower_clear_mz_range", "Lower Clear m/z Range"),
            |p| p.lower_clear_mz_range,
            |p, v| p.lower_clear_mz_range = v,
        )
        .real(
            FieldDescriptor::real("upper_clear_mz_range", "Upper Clear m/z Range"),
            |p| p.upper_clear_mz_range,
            |p, v| p.upper_clear_mz_range = v,
        )
        .choice(
            FieldDescriptor::choice("enzyme_type", "Enzyme Type"),
            enzyme_type_codec()?,
            |p| p.enzyme_type,
            |p, v| p.enzyme_type = v,
        )
        .choice(
            FieldDescriptor::choice("isotope_correction", "Isotope Correction"),
            EnumCodec::identity(&["No Correction", "-1, 0, +1, +2, and +3", "-8, -4, 0, +4 and +8"])?,
            |p| p.isotope_correction,
            |p, v| p.isotope_correction = v,
        )
        .real(
            FieldDescriptor::real("min_precursor_mass", "Minimum Precursor Mass"),
            |p| p.min_precursor_mass,
            |p, v| p.min_precursor_mass = v,
        )
        .real(
            FieldDescriptor::real("max_precursor_mass", "Maximum Precursor Mass"),
            |p| p.max_precursor_mass,
            |p, v| p.max_precursor_mass = v,
        )
        .integer(
            FieldDescriptor::integer("max_fragment_charge", "Maximum Fragment Ion Charge"),
            |p| p.max_fragment_charge,
            |p, v| p.max_fragment_charge = v,
        )
        .boolean(
            FieldDescriptor::boolean("remove_methionine", "Remove Starting Methionine"),
            |p| p.remove_methionine,
            |p, v| p.remove_methionine = v,
        )
        .integer(
            FieldDescriptor::integer("batch_size", "Batch Size"),
            |p| p.batch_size,
            |p, v| p.batch_size = v,
        )
        .field(
            FieldDescriptor::choice("correlation_score_type", "Correlation Score Type"),
            Some(score_codec),
            score_accessor,
        )
        .real(
            FieldDescriptor::real("fragment_bin_offset", "Fragment Bin Offset"),
            |p| p.fragment_bin_offset,
            |p, v| p.fragment_bin_offset = v,
        )
        .choice(
            FieldDescriptor::choice("output_format", "Output Format"),
            CometOutputFormat::codec()?,
            |p| p.output_format,
            |p, v| p.output_format = v,
        )
        .boolean(
            FieldDescriptor::boolean("print_expect_score", "Print Expectation Score"),
            |p| p.print_expect_score,
            |p, v| p.print_expect_score = v,
        )
        .constraint(CrossFieldConstraint::ordered_pair(
            "clear_mz_range",
            "lower_clear_mz_range",
            "upper_clear_mz_range",
        ))
        .constraint(CrossFieldConstraint::ordered_pair(
            "precursor_mass_range",
            "min_precursor_mass",
            "max_precursor_mass",
        ))
        .rule(
            EnablementRule::enabled_when(
                "output_format",
                TypedValue::Choice(EnumValue::name(CometOutputFormat::Sqt.as_str())),
            )
            .dependents(&["print_expect_score"]),
        )
        .build()
}
