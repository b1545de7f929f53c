use crate::import_inspector::field::FieldValue;
use crate::import_inspector::settings::{ImportConfig, MaterialNaming, MaterialSearch, OptionEnum};

const HELP_START: &str = "For each imported material, the importer first looks for an existing material named %MAT%.";
const HELP_END: &str = "If it doesn't exist, a new one is created in the local Materials folder.";
const HELP_DEFAULT: &str = "No new materials are generated. The default material is used instead.";
const HELP_MIXED: &str = "Material settings differ across the selection.";

const MAIN_NAMING_OPTIONS: &[MaterialNaming] = &[
    MaterialNaming::BaseTextureName,
    MaterialNaming::ModelMaterial,
    MaterialNaming::ModelNameAndMaterial,
];

fn naming_help(naming: MaterialNaming) -> &'static str {
    match naming {
        MaterialNaming::BaseTextureName => "[BaseTextureName]",
        MaterialNaming::ModelMaterial => "[MaterialName]",
        MaterialNaming::ModelNameAndMaterial => "[ModelFileName]-[MaterialName]",
        MaterialNaming::TextureOrModelNameAndMaterial => {
            "[BaseTextureName] or [ModelFileName]-[MaterialName] if no base texture can be found"
        }
    }
}

fn search_help(search: MaterialSearch) -> &'static str {
    match search {
        MaterialSearch::LocalFolder => "The importer will look for it in the local Materials folder.",
        MaterialSearch::RecursiveUp => {
            "The importer will do a recursive-up search for it in all Materials folders up to the Assets folder."
        }
        MaterialSearch::ProjectWide => {
            "The importer will search for it anywhere inside the Assets folder."
        }
    }
}

pub fn shows_obsolete_naming(selection: &[ImportConfig]) -> bool {
    selection
        .iter()
        .any(|config| config.material_naming == MaterialNaming::TextureOrModelNameAndMaterial)
}

pub fn naming_options(show_obsolete: bool) -> &'static [MaterialNaming] {
    if show_obsolete {
        MaterialNaming::ALL
    } else {
        MAIN_NAMING_OPTIONS
    }
}

pub fn material_help(
    import_materials: FieldValue<bool>,
    naming: FieldValue<MaterialNaming>,
    search: FieldValue<MaterialSearch>,
) -> String {
    match (import_materials, naming, search) {
        (FieldValue::Uniform(false), _, _) => HELP_DEFAULT.to_string(),
        (FieldValue::Uniform(true), FieldValue::Uniform(naming), FieldValue::Uniform(search)) => {
            format!(
                "{}\n{}\n{}",
                HELP_START.replace("%MAT%", naming_help(naming)),
                search_help(search),
                HELP_END
            )
        }
        _ => HELP_MIXED.to_string(),
    }
}
