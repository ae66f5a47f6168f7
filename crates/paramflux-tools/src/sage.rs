//! # Sage
//!
//! Fragment indexing, spectrum processing and quantification settings of Sage.

use paramflux_inspector::{
    AccessError, Accessor, ChoiceValue, CrossFieldConstraint, EnumCodec, EnumValue, FieldDescriptor,
    ParameterSchema, SchemaError, TypedValue, ValueShape,
};
use serde::{Deserialize, Serialize};

pub const HELP_URL: &str = "https://github.com/lazear/sage";

/// Combo label standing for "no TMT labelling".
pub const NO_TMT: &str = "None";

named_choice! {
    /// Isobaric TMT multiplexing.
    pub enum TmtType {
        Tmt6 => "Tmt6",
        Tmt10 => "Tmt10",
        Tmt11 => "Tmt11",
        Tmt16 => "Tmt16",
        Tmt18 => "Tmt18",
    }
    default Tmt6
}

/// Sage specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SageParameters {
    pub bucket_size: i32,
    pub min_peptide_length: i32,
    pub max_peptide_length: i32,
    pub min_fragment_mz: f64,
    pub max_fragment_mz: f64,
    pub min_peptide_mass: f64,
    pub max_peptide_mass: f64,
    pub min_ion_index: i32,
    pub max_variable_mods: i32,
    pub generate_decoys: bool,
    pub decoy_tag: Option<String>,
    pub tmt_type: Option<TmtType>,
    pub perform_lfq: bool,
    pub deisotope: bool,
    pub chimera: bool,
    pub predict_rt: bool,
    pub min_peaks: i32,
    pub max_peaks: i32,
    /// `None` lets Sage use the precursor charge.
    pub max_fragment_charge: Option<i32>,
    pub num_psms_per_spectrum: i32,
    pub parallel_search: bool,
}

impl Default for SageParameters {
    fn default() -> Self {
        Self {
            bucket_size: 32768,
            min_peptide_length: 8,
            max_peptide_length: 30,
            min_fragment_mz: 200.0,
            max_fragment_mz: 2000.0,
            min_peptide_mass: 600.0,
            max_peptide_mass: 5000.0,
            min_ion_index: 2,
            max_variable_mods: 2,
            generate_decoys: false,
            decoy_tag: Some("_REVERSED".to_string()),
            tmt_type: None,
            perform_lfq: false,
            deisotope: false,
            chimera: false,
            predict_rt: true,
            min_peaks: 15,
            max_peaks: 150,
            max_fragment_charge: None,
            num_psms_per_spectrum: 1,
            parallel_search: true,
        }
    }
}

/// The TMT combo puts [`NO_TMT`] in front of the TMT variants.
fn tmt_type_field() -> Result<(EnumCodec, Accessor<SageParameters>), SchemaError> {
    let mut labels = vec![NO_TMT];
    labels.extend(TmtType::ALL.iter().map(|tmt| tmt.as_str()));
    let codec = EnumCodec::names(&labels)?;

    let accessor = Accessor::new(
        ValueShape::Choice,
        false,
        |p: &SageParameters| {
            TypedValue::Choice(p.tmt_type.map_or_else(|| EnumValue::name(NO_TMT), |tmt| tmt.to_enum_value()))
        },
        |p: &mut SageParameters, value: &TypedValue| match value {
            TypedValue::Choice(EnumValue::Name(name)) if name == NO_TMT => {
                p.tmt_type = None;
                Ok(())
            }
            TypedValue::Choice(choice) => {
                let tmt = TmtType::from_enum_value(choice).ok_or_else(|| AccessError::UnknownChoice(choice.clone()))?;
                p.tmt_type = Some(tmt);
                Ok(())
            }
            other => Err(AccessError::TypeMismatch {
                expected: "choice",
                found: other.type_name(),
            }),
        },
    );
    Ok((codec, accessor))
}

pub fn schema() -> Result<ParameterSchema<SageParameters>, SchemaError> {
    let (tmt_codec, tmt_accessor) = tmt_type_field()?;

    ParameterSchema::<SageParameters>::builder("Sage")
        .help_url(HELP_URL)
        .integer(
            FieldDescriptor::integer("bucket_size", "Bucket Size"),
            |p| p.bucket_size,
            |p, v| p.bucket_size = v,
        )
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
            FieldDescriptor::real("min_fragment_mz", "Minimum Fragment m/z"),
            |p| p.min_fragment_mz,
            |p, v| p.min_fragment_mz = v,
        )
        .real(
            FieldDescriptor::real("max_fragment_mz", "Maximum Fragment m/z"),
            |p| p.max_fragment_mz,
            |p, v| p.max_fragment_mz = v,
        )
        .real(
            FieldDescriptor::real("min_peptide_mass", "Minimum Peptide Mass"),
            |p| p.min_peptide_mass,
            |p, v| p.min_peptide_mass = v,
        )
        .real(
            FieldDescriptor::real("max_peptide_mass", "Maximum Peptide Mass"),
            |p| p.max_peptide_mass,
            |p, v| p.max_peptide_mass = v,
        )
        .integer(
            FieldDescriptor::integer("min_ion_index", "Minimum Ion Index"),
            |p| p.min_ion_index,
            |p, v| p.min_ion_index = v,
        )
        .integer(
            FieldDescriptor::integer("max_variable_mods", "Maximum Variable Modifications"),
            |p| p.max_variable_mods,
            |p, v| p.max_variable_mods = v,
        )
        .boolean(
            FieldDescriptor::boolean("generate_decoys", "Generate Decoys"),
            |p| p.generate_decoys,
            |p, v| p.generate_decoys = v,
        )
        .optional_text(
            FieldDescriptor::text("decoy_tag", "Decoy Tag").optional(),
            |p| p.decoy_tag.clone(),
            |p, v| p.decoy_tag = v,
        )
        .field(FieldDescriptor::choice("tmt_type", "TMT Type"), Some(tmt_codec), tmt_accessor)
        .boolean(
            FieldDescriptor::boolean("perform_lfq", "LFQ"),
            |p| p.perform_lfq,
            |p, v| p.perform_lfq = v,
        )
        .boolean(
            FieldDescriptor::boolean("deisotope", "Deisotope"),
            |p| p.deisotope,
            |p, v| p.deisotope = v,
        )
        .boolean(
            FieldDescriptor::boolean("chimera", "Chimeric Spectra"),
            |p| p.chimera,
            |p, v| p.chimera = v,
        )
        .boolean(
            FieldDescriptor::boolean("predict_rt", "Predict Retention Time"),
            |p| p.predict_rt,
            |p, v| p.predict_rt = v,
        )
        .integer(
            FieldDescriptor::integer("min_peaks", "Minimum Number of Peaks"),
            |p| p.min_peaks,
            |p, v| p.min_peaks = v,
        )
        .integer(
            FieldDescriptor::integer("max_peaks", "Maximum Number of Peaks"),
            |p| p.max_peaks,
            |p, v| p.max_peaks = v,
        )
        .optional_integer(
            FieldDescriptor::optional_integer("max_fragment_charge", "Maximum Fragment Charge"),
            |p| p.max_fragment_charge,
            |p, v| p.max_fragment_charge = v,
        )
        .integer(
            FieldDescriptor::integer("num_psms_per_spectrum", "Number of PSMs per Spectrum"),
            |p| p.num_psms_per_spectrum,
            |p, v| p.num_psms_per_spectrum = v,
        )
        .boolean(
            FieldDescriptor::boolean("parallel_search", "Parallel Search"),
            |p| p.parallel_search,
            |p, v| p.parallel_search = v,
        )
        .constraint(CrossFieldConstraint::ordered_pair(
            "peptide_length_range",
            "min_peptide_length",
            "max_peptide_length",
        ))
        .constraint(CrossFieldConstraint::ordered_pair(
            "fragment_mz_range",
            "min_fragment_mz",
            "max_fragment_mz",
        ))
        .constraint(CrossFieldConstraint::ordered_pair(
            "peptide_mass_range",
            "min_peptide_mass",
            "max_peptide_mass",
        ))
        .constraint(CrossFieldConstraint::ordered_pair("peaks_range", "min_peaks", "max_peaks"))
        .build()
}
