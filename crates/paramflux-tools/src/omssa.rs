//! # OMSSA
//!
//! Spectrum processing, search and output settings of OMSSA.
//!
//! Every field writes exactly one member. In particular the minimal number
//! of peaks lands in `min_peaks`, never in `intensity_cutoff_increment`.

use paramflux_inspector::{
    AccessError, Accessor, CrossFieldConstraint, EnumCodec, EnumValue, FieldDescriptor, ParameterSchema,
    SchemaError, TypedValue, ValueShape,
};
use serde::{Deserialize, Serialize};

pub const HELP_URL: &str = "http://www.ncbi.nlm.nih.gov/pubmed/15473683";

named_choice! {
    pub enum OmssaOutputFormat {
        Omx => "OMX",
        Csv => "CSV",
        PepXml => "pepXML",
    }
    default Omx
}

/// OMSSA specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OmssaParameters {
    pub low_intensity_cutoff: f64,
    pub high_intensity_cutoff: f64,
    pub intensity_cutoff_increment: f64,
    pub min_peaks: i32,
    pub remove_precursor: bool,
    /// True: use the charge range, false: believe the input file.
    pub estimate_charge: bool,
    pub determine_charge_plus_one_algorithmically: bool,
    pub fraction_of_peaks_for_charge_estimation: f64,
    pub min_prec_per_spectrum: i32,
    pub scale_precursor: bool,
    pub memory_mapped_sequence_libraries: bool,
    pub cleave_nterm_methionine: bool,
    pub minimal_charge_for_multiple_charged_fragments: i32,
    pub neutron_threshold: f64,
    pub single_charge_window: i32,
    pub double_charge_window: i32,
    pub n_peaks_in_single_charge_window: i32,
    pub n_peaks_in_double_charge_window: i32,
    pub n_annotated_most_intense_peaks: i32,
    pub min_annotated_peaks: i32,
    pub max_mz_ladders: i32,
    pub max_fragment_charge: i32,
    pub search_positive_ions: bool,
    pub search_forward_fragment_first: bool,
    pub search_rewind_fragments: bool,
    pub max_fragment_per_series: i32,
    pub use_correlation_correction_score: bool,
    pub consecutive_ion_probability: f64,
    pub max_hits_per_spectrum_per_charge: i32,
    pub iterative_sequence_evalue: f64,
    pub iterative_spectrum_evalue: f64,
    pub iterative_replace_evalue: f64,
    pub min_peptide_length: i32,
    pub max_peptide_length: i32,
    pub max_e_value: f64,
    pub hit_list_length: i32,
    pub selected_output: OmssaOutputFormat,
}

impl Default for OmssaParameters {
    fn default() -> Self {
        Self {
            low_intensity_cutoff: 0.0,
            high_intensity_cutoff: 0.2,
            intensity_cutoff_increment: 0.0005,
            min_peaks: 4,
            remove_precursor: false,
            estimate_charge: true,
            determine_charge_plus_one_algorithmically: true,
            fraction_of_peaks_for_charge_estimation: 0.95,
            min_prec_per_spectrum: 1,
            scale_precursor: true,
            memory_mapped_sequence_libraries: false,
            cleave_nterm_methionine: true,
            minimal_charge_for_multiple_charged_fragments: 3,
            neutron_threshold: 1446.94,
            single_charge_window: 27,
            double_charge_window: 14,
            n_peaks_in_single_charge_window: 2,
            n_peaks_in_double_charge_window: 2,
            n_annotated_most_intense_peaks: 6,
            min_annotated_peaks: 2,
            max_mz_ladders: 128,
            max_fragment_charge: 2,
            search_positive_ions: true,
            search_forward_fragment_first: false,
            search_rewind_fragments: true,
            max_fragment_per_series: 100,
            use_correlation_correction_score: true,
            consecutive_ion_probability: 0.5,
            max_hits_per_spectrum_per_charge: 30,
            iterative_sequence_evalue: 0.0,
            iterative_spectrum_evalue: 0.01,
            iterative_replace_evalue: 0.0,
            min_peptide_length: 8,
            max_peptide_length: 30,
            max_e_value: 100.0,
            hit_list_length: 10,
            selected_output: OmssaOutputFormat::Omx,
        }
    }
}

pub fn schema() -> Result<ParameterSchema<OmssaParameters>, SchemaError> {
    let (charge_codec, charge_accessor) = charge_estimation_field()?;

    ParameterSchema::<OmssaParameters>::builder("OMSSA")
        .help_url(HELP_URL)
        // Spectrum processing
        .real(
            FieldDescriptor::real("low_intensity_cutoff", "Low Intensity Cutoff"),
            |p| p.low_intensity_cutoff,
            |p, v| p.low_intensity_cutoff = v,
        )
        .real(
            FieldDescriptor::real("high_intensity_cutoff", "High Intensity Cutoff"),
            |p| p.high_intensity_cutoff,
            |p, v| p.high_intensity_cutoff = v,
        )
        .real(
            FieldDescriptor::real("intensity_cutoff_increment", "Intensity Cutoff Increment"),
            |p| p.intensity_cutoff_increment,
            |p, v| p.intensity_cutoff_increment = v,
        )
        .integer(
            FieldDescriptor::integer("min_peaks", "Minimal Number of Peaks"),
            |p| p.min_peaks,
            |p, v| p.min_peaks = v,
        )
        .boolean(
            FieldDescriptor::boolean("remove_precursor", "Eliminate Charge Reduced Precursors"),
            |p| p.remove_precursor,
            |p, v| p.remove_precursor = v,
        )
        .field(
            FieldDescriptor::choice("estimate_charge", "Precursor Charge Estimation"),
            Some(charge_codec),
            charge_accessor,
        )
        .boolean(
            FieldDescriptor::boolean(
                "determine_charge_plus_one_algorithmically",
                "Plus One Charge Estimated Algorithmically",
            ),
            |p| p.determine_charge_plus_one_algorithmically,
            |p, v| p.determine_charge_plus_one_algorithmically = v,
        )
        .real(
            FieldDescriptor::real(
                "fraction_of_peaks_for_charge_estimation",
                "Fraction of Precursor m/z for Charge One Estimation",
            ),
            |p| p.fraction_of_peaks_for_charge_estimation,
            |p, v| p.fraction_of_peaks_for_charge_estimation = v,
        )
        .integer(
            FieldDescriptor::integer("min_prec_per_spectrum", "Minimal Number of Precursors per Spectrum"),
            |p| p.min_prec_per_spectrum,
            |p, v| p.min_prec_per_spectrum = v,
        )
        .boolean(
            FieldDescriptor::boolean("scale_precursor", "Precursor Mass Scaling"),
            |p| p.scale_precursor,
            |p, v| p.scale_precursor = v,
        )
        // Search
        .boolean(
            FieldDescriptor::boolean("memory_mapped_sequence_libraries", "Sequences Mapping in Memory"),
            |p| p.memory_mapped_sequence_libraries,
            |p, v| p.memory_mapped_sequence_libraries = v,
        )
        .boolean(
            FieldDescriptor::boolean("cleave_nterm_methionine", "Cleave N-terminal Methionine"),
            |p| p.cleave_nterm_methionine,
            |p, v| p.cleave_nterm_methionine = v,
        )
        .integer(
            FieldDescriptor::integer(
                "minimal_charge_for_multiple_charged_fragments",
                "Minimum Precursor Charge for Multiply Charged Fragments",
            ),
            |p| p.minimal_charge_for_multiple_charged_fragments,
            |p, v| p.minimal_charge_for_multiple_charged_fragments = v,
        )
        .real(
            FieldDescriptor::real("neutron_threshold", "Mass Threshold to Consider Exact Neutron Mass"),
            |p| p.neutron_threshold,
            |p, v| p.neutron_threshold = v,
        )
        .integer(
            FieldDescriptor::integer("single_charge_window", "Singly Charged Window Width"),
            |p| p.single_charge_window,
            |p, v| p.single_charge_window = v,
        )
        .integer(
            FieldDescriptor::integer("double_charge_window", "Doubly Charged Window Width"),
            |p| p.double_charge_window,
            |p, v| p.double_charge_window = v,
        )
        .integer(
            FieldDescriptor::integer("n_peaks_in_single_charge_window", "Number of Peaks in Singly Charged Windows"),
            |p| p.n_peaks_in_single_charge_window,
            |p, v| p.n_peaks_in_single_charge_window = v,
        )
        .integer(
            FieldDescriptor::integer("n_peaks_in_double_charge_window", "Number of Peaks in Doubly Charged Windows"),
            |p| p.n_peaks_in_double_charge_window,
            |p, v| p.n_peaks_in_double_charge_window = v,
        )
        .integer(
            FieldDescriptor::integer(
                "n_annotated_most_intense_peaks",
                "Minimum Annotated Peaks Among the Most Intense Ones",
            ),
            |p| p.n_annotated_most_intense_peaks,
            |p, v| p.n_annotated_most_intense_peaks = v,
        )
        .integer(
            FieldDescriptor::integer("min_annotated_peaks", "Minimum Number of Annotated Peaks"),
            |p| p.min_annotated_peaks,
            |p, v| p.min_annotated_peaks = v,
        )
        .integer(
            FieldDescriptor::integer("max_mz_ladders", "Maximum m/z Ladders"),
            |p| p.max_mz_ladders,
            |p, v| p.max_mz_ladders = v,
        )
        .integer(
            FieldDescriptor::integer("max_fragment_charge", "Maximum Fragment Charge"),
            |p| p.max_fragment_charge,
            |p, v| p.max_fragment_charge = v,
        )
        .boolean(
            FieldDescriptor::boolean("search_positive_ions", "Search Positive Ions"),
            |p| p.search_positive_ions,
            |p, v| p.search_positive_ions = v,
        )
        .boolean(
            FieldDescriptor::boolean("search_forward_fragment_first", "Search First Forward Ion (b1)"),
            |p| p.search_forward_fragment_first,
            |p, v| p.search_forward_fragment_first = v,
        )
        .boolean(
            FieldDescriptor::boolean("search_rewind_fragments", "Search Rewind (C-terminal) Ions"),
            |p| p.search_rewind_fragments,
            |p, v| p.search_rewind_fragments = v,
        )
        .integer(
            FieldDescriptor::integer("max_fragment_per_series", "Maximum Fragments per Series"),
            |p| p.max_fragment_per_series,
            |p, v| p.max_fragment_per_series = v,
        )
        .boolean(
            FieldDescriptor::boolean("use_correlation_correction_score", "Use Correlation Correction Score"),
            |p| p.use_correlation_correction_score,
            |p, v| p.use_correlation_correction_score = v,
        )
        .real(
            FieldDescriptor::real("consecutive_ion_probability", "Consecutive Ion Probability"),
            |p| p.consecutive_ion_probability,
            |p, v| p.consecutive_ion_probability = v,
        )
        .integer(
            FieldDescriptor::integer(
                "max_hits_per_spectrum_per_charge",
                "Number of Hits per Spectrum per Charge",
            ),
            |p| p.max_hits_per_spectrum_per_charge,
            |p, v| p.max_hits_per_spectrum_per_charge = v,
        )
        // Iterative search
        .real(
            FieldDescriptor::real("iterative_sequence_evalue", "E-value Cutoff for Sequences"),
            |p| p.iterative_sequence_evalue,
            |p, v| p.iterative_sequence_evalue = v,
        )
        .real(
            FieldDescriptor::real("iterative_spectrum_evalue", "E-value Cutoff for Spectra"),
            |p| p.iterative_spectrum_evalue,
            |p, v| p.iterative_spectrum_evalue = v,
        )
        .real(
            FieldDescriptor::real("iterative_replace_evalue", "E-value Cutoff to Replace a Hit"),
            |p| p.iterative_replace_evalue,
            |p, v| p.iterative_replace_evalue = v,
        )
        // Semi-enzymatic and output
        .integer(
            FieldDescriptor::integer("min_peptide_length", "Minimum Peptide Length"),
            |p| p.min_peptide_length,
            |p, v| p.min_peptide_length = v,
        )
        .integer(
            FieldDescriptor::integer("max_peptide_length", "Maximum Peptide Length"),
            |p| p.max_peptide_length,
            |p, v| p.max_peptide_length = v,
        )
        .real(
            FieldDescriptor::real("max_e_value", "E-value Cutoff"),
            |p| p.max_e_value,
            |p, v| p.max_e_value = v,
        )
        .integer(
            FieldDescriptor::integer("hit_list_length", "Maximum HitList Length"),
            |p| p.hit_list_length,
            |p, v| p.hit_list_length = v,
        )
        .choice(
            FieldDescriptor::choice("selected_output", "OMSSA Output Format"),
            OmssaOutputFormat::codec()?,
            |p| p.selected_output,
            |p, v| p.selected_output = v,
        )
        .constraint(CrossFieldConstraint::ordered_pair(
            "peptide_length_range",
            "min_peptide_length",
            "max_peptide_length",
        ))
        .build()
}

/// "Use Range" sits at index 0 and means `estimate_charge == true`.
fn charge_estimation_field() -> Result<(EnumCodec, Accessor<OmssaParameters>), SchemaError> {
    let codec = EnumCodec::identity(&["Use Range", "Believe Input File"])?;
    let accessor = Accessor::new(
        ValueShape::Choice,
        false,
        |p: &OmssaParameters| TypedValue::Choice(EnumValue::Code(if p.estimate_charge { 0 } else { 1 })),
        |p: &mut OmssaParameters, value: &TypedValue| match value {
            TypedValue::Choice(EnumValue::Code(code @ (0 | 1))) => {
                p.estimate_charge = *code == 0;
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
