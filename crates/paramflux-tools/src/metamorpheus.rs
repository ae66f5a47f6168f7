//! # MetaMorpheus
//!
//! Search, deconvolution and peak trimming settings of MetaMorpheus.

use paramflux_inspector::{CrossFieldConstraint, FieldDescriptor, ParameterSchema, SchemaError};
use serde::{Deserialize, Serialize};

pub const HELP_URL: &str = "https://github.com/smith-chem-wisc/MetaMorpheus/wiki";

named_choice! {
    pub enum SearchType {
        Classic => "Classic",
        Modern => "Modern",
        NonSpecific => "NonSpecific",
    }
    default Classic
}

named_choice! {
    pub enum DissociationType {
        Hcd => "HCD",
        Cid => "CID",
        Ecd => "ECD",
        Etd => "ETD",
    }
    default Hcd
}

named_choice! {
    pub enum InitiatorMethionineBehavior {
        Undefined => "Undefined",
        Retain => "Retain",
        Cleave => "Cleave",
        Variable => "Variable",
    }
    default Variable
}

named_choice! {
    pub enum FragmentationTerminus {
        Both => "Both",
        N => "N",
        C => "C",
    }
    default Both
}

named_choice! {
    /// Which precursor mass differences are accepted.
    pub enum MassDiffAcceptorType {
        Exact => "Exact",
        OneMm => "OneMM",
        TwoMm => "TwoMM",
        ThreeMm => "ThreeMM",
        PlusOrMinusThreeMm => "PlusOrMinusThreeMM",
        ModOpen => "ModOpen",
        Open => "Open",
    }
    default OneMm
}

named_choice! {
    pub enum ToleranceType {
        Ppm => "PPM",
        Absolute => "Absolute",
    }
    default Ppm
}

named_choice! {
    pub enum DecoyType {
        None => "None",
        Reverse => "Reverse",
        Slide => "Slide",
    }
    default None
}

/// MetaMorpheus specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaMorpheusParameters {
    pub min_peptide_length: i32,
    pub max_peptide_length: i32,
    pub search_type: SearchType,
    pub total_partitions: i32,
    pub dissociation_type: DissociationType,
    /// Negative values are accepted.
    pub max_mods_for_peptide: i32,
    pub initiator_methionine_behavior: InitiatorMethionineBehavior,
    pub score_cutoff: f64,
    pub use_delta_score: bool,
    pub fragmentation_terminus: FragmentationTerminus,
    pub max_fragment_size: f64,
    pub mass_diff_acceptor_type: MassDiffAcceptorType,
    pub write_mz_id: bool,
    pub write_pep_xml: bool,
    pub use_provided_precursor_info: bool,
    pub do_precursor_deconvolution: bool,
    pub deconvolution_intensity_ratio: f64,
    pub deconvolution_mass_tolerance: f64,
    pub deconvolution_mass_tolerance_type: ToleranceType,
    pub trim_ms1_peaks: bool,
    pub trim_msms_peaks: bool,
    pub number_of_peaks_to_keep_per_window: i32,
    pub min_allowed_intensity_ratio_to_base_peak: f64,
    pub window_width_thomsons: Option<f64>,
    pub number_of_windows: Option<i32>,
    pub normalize_peaks_across_all_windows: bool,
    pub mod_peptides_are_different: bool,
    pub no_one_hit_wonders: bool,
    pub search_target: bool,
    pub decoy_type: DecoyType,
    pub max_modification_isoforms: i32,
    pub min_variant_depth: i32,
    pub max_heterozygous_variants: i32,
    pub run_gptm: bool,
}

impl Default for MetaMorpheusParameters {
    fn default() -> Self {
        Self {
            min_peptide_length: 8,
            max_peptide_length: 30,
            search_type: SearchType::Classic,
            total_partitions: 1,
            dissociation_type: DissociationType::Hcd,
            max_mods_for_peptide: 2,
            initiator_methionine_behavior: InitiatorMethionineBehavior::Variable,
            score_cutoff: 5.0,
            use_delta_score: false,
            fragmentation_terminus: FragmentationTerminus::Both,
            max_fragment_size: 30000.0,
            mass_diff_acceptor_type: MassDiffAcceptorType::OneMm,
            write_mz_id: true,
            write_pep_xml: false,
            use_provided_precursor_info: true,
            do_precursor_deconvolution: true,
            deconvolution_intensity_ratio: 3.0,
            deconvolution_mass_tolerance: 4.0,
            deconvolution_mass_tolerance_type: ToleranceType::Ppm,
            trim_ms1_peaks: false,
            trim_msms_peaks: true,
            number_of_peaks_to_keep_per_window: 200,
            min_allowed_intensity_ratio_to_base_peak: 0.01,
            window_width_thomsons: None,
            number_of_windows: None,
            normalize_peaks_across_all_windows: false,
            mod_peptides_are_different: false,
            no_one_hit_wonders: false,
            search_target: true,
            decoy_type: DecoyType::None,
            max_modification_isoforms: 1024,
            min_variant_depth: 1,
            max_heterozygous_variants: 4,
            run_gptm: false,
        }
    }
}

pub fn schema() -> Result<ParameterSchema<MetaMorpheusParameters>, SchemaError> {
    ParameterSchema::<MetaMorpheusParameters>::builder("MetaMorpheus")
        .help_url(HELP_URL)
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
        .choice(
            FieldDescriptor::choice("search_type", "Search Type"),
            SearchType::codec()?,
            |p| p.search_type,
            |p, v| p.search_type = v,
        )
        .integer(
            FieldDescriptor::integer("total_partitions", "Total Partitions"),
            |p| p.total_partitions,
            |p, v| p.total_partitions = v,
        )
        .choice(
            FieldDescriptor::choice("dissociation_type", "Dissociation Type"),
            DissociationType::codec()?,
            |p| p.dissociation_type,
            |p, v| p.dissociation_type = v,
        )
        .integer(
            FieldDescriptor::integer("max_mods_for_peptide", "Maximum Modifications per Peptide").allow_negative(),
            |p| p.max_mods_for_peptide,
            |p, v| p.max_mods_for_peptide = v,
        )
        .choice(
            FieldDescriptor::choice("initiator_methionine_behavior", "Initiator Methionine Behavior"),
            InitiatorMethionineBehavior::codec()?,
            |p| p.initiator_methionine_behavior,
            |p, v| p.initiator_methionine_behavior = v,
        )
        .real(
            FieldDescriptor::real("score_cutoff", "Score Cutoff"),
            |p| p.score_cutoff,
            |p, v| p.score_cutoff = v,
        )
        .boolean(
            FieldDescriptor::boolean("use_delta_score", "Use Delta Score"),
            |p| p.use_delta_score,
            |p, v| p.use_delta_score = v,
        )
        .choice(
            FieldDescriptor::choice("fragmentation_terminus", "Fragmentation Terminus"),
            FragmentationTerminus::codec()?,
            |p| p.fragmentation_terminus,
            |p, v| p.fragmentation_terminus = v,
        )
        .real(
            FieldDescriptor::real("max_fragment_size", "Maximum Fragment Mass"),
            |p| p.max_fragment_size,
            |p, v| p.max_fragment_size = v,
        )
        .choice(
            FieldDescriptor::choice("mass_diff_acceptor_type", "Mass Difference Acceptor"),
            MassDiffAcceptorType::codec()?,
            |p| p.mass_diff_acceptor_type,
            |p, v| p.mass_diff_acceptor_type = v,
        )
        .boolean(
            FieldDescriptor::boolean("write_mz_id", "Write mzIdentML"),
            |p| p.write_mz_id,
            |p, v| p.write_mz_id = v,
        )
        .boolean(
            FieldDescriptor::boolean("write_pep_xml", "Write pepXML"),
            |p| p.write_pep_xml,
            |p, v| p.write_pep_xml = v,
        )
        .boolean(
            FieldDescriptor::boolean("use_provided_precursor_info", "Use Provided Precursor Info"),
            |p| p.use_provided_precursor_info,
            |p, v| p.use_provided_precursor_info = v,
        )
        .boolean(
            FieldDescriptor::boolean("do_precursor_deconvolution", "Precursor Deconvolution"),
            |p| p.do_precursor_deconvolution,
            |p, v| p.do_precursor_deconvolution = v,
        )
        .real(
            FieldDescriptor::real("deconvolution_intensity_ratio", "Deconvolution Intensity Ratio"),
            |p| p.deconvolution_intensity_ratio,
            |p, v| p.deconvolution_intensity_ratio = v,
        )
        .real(
            FieldDescriptor::real("deconvolution_mass_tolerance", "Deconvolution Mass Tolerance"),
            |p| p.deconvolution_mass_tolerance,
            |p, v| p.deconvolution_mass_tolerance = v,
        )
        .choice(
            FieldDescriptor::choice("deconvolution_mass_tolerance_type", "Deconvolution Mass Tolerance Type"),
            ToleranceType::codec()?,
            |p| p.deconvolution_mass_tolerance_type,
            |p, v| p.deconvolution_mass_tolerance_type = v,
        )
        .boolean(
            FieldDescriptor::boolean("trim_ms1_peaks", "Trim MS1 Peaks"),
            |p| p.trim_ms1_peaks,
            |p, v| p.trim_ms1_peaks = v,
        )
        .boolean(
            FieldDescriptor::boolean("trim_msms_peaks", "Trim MS2 Peaks"),
            |p| p.trim_msms_peaks,
            |p, v| p.trim_msms_peaks = v,
        )
        .integer(
            FieldDescriptor::integer("number_of_peaks_to_keep_per_window", "Peaks to Keep per Window"),
            |p| p.number_of_peaks_to_keep_per_window,
            |p, v| p.number_of_peaks_to_keep_per_window = v,
        )
        .real(
            FieldDescriptor::real(
                "min_allowed_intensity_ratio_to_base_peak",
                "Minimum Intensity Ratio to Base Peak",
            ),
            |p| p.min_allowed_intensity_ratio_to_base_peak,
            |p, v| p.min_allowed_intensity_ratio_to_base_peak = v,
        )
        .optional_real(
            FieldDescriptor::optional_real("window_width_thomsons", "Window Width (Thomson)"),
            |p| p.window_width_thomsons,
            |p, v| p.window_width_thomsons = v,
        )
        .optional_integer(
            FieldDescriptor::optional_integer("number_of_windows", "Number of Windows"),
            |p| p.number_of_windows,
            |p, v| p.number_of_windows = v,
        )
        .boolean(
            FieldDescriptor::boolean("normalize_peaks_across_all_windows", "Normalize Peaks Across Windows"),
            |p| p.normalize_peaks_across_all_windows,
            |p, v| p.normalize_peaks_across_all_windows = v,
        )
        .boolean(
            FieldDescriptor::boolean("mod_peptides_are_different", "Modified Peptides Are Different"),
            |p| p.mod_peptides_are_different,
            |p, v| p.mod_peptides_are_different = v,
        )
        .boolean(
            FieldDescriptor::boolean("no_one_hit_wonders", "Exclude One-Hit Wonders"),
            |p| p.no_one_hit_wonders,
            |p, v| p.no_one_hit_wonders = v,
        )
        .boolean(
            FieldDescriptor::boolean("search_target", "Search Target Sequences"),
            |p| p.search_target,
            |p, v| p.search_target = v,
        )
        .choice(
            FieldDescriptor::choice("decoy_type", "Decoy Type"),
            DecoyType::codec()?,
            |p| p.decoy_type,
            |p, v| p.decoy_type = v,
        )
        .integer(
            FieldDescriptor::integer("max_modification_isoforms", "Maximum Modification Isoforms"),
            |p| p.max_modification_isoforms,
            |p, v| p.max_modification_isoforms = v,
        )
        .integer(
            FieldDescriptor::integer("min_variant_depth", "Minimum Variant Depth"),
            |p| p.min_variant_depth,
            |p, v| p.min_variant_depth = v,
        )
        .integer(
            FieldDescriptor::integer("max_heterozygous_variants", "Maximum Heterozygous Variants"),
            |p| p.max_heterozygous_variants,
            |p, v| p.max_heterozygous_variants = v,
        )
        .boolean(
            FieldDescriptor::boolean("run_gptm", "Run G-PTM"),
            |p| p.run_gptm,
            |p, v| p.run_gptm = v,
        )
        .constraint(CrossFieldConstraint::ordered_pair(
            "peptide_length_range",
            "min_peptide_length",
            "max_peptide_length",
        ))
        .build()
}
