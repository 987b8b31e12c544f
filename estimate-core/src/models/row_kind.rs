use serde::{Deserialize, Serialize};

/// What an estimate row represents.
///
/// Header rows open a billing group and carry no money of their own.
/// `Separator` covers blank or unrecognised row types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RowKind {
    Header,
    Labor,
    Material,
    SubcontractLabor,
    SubcontractMaterial,
    #[default]
    Separator,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "Заказчик",
            Self::Labor => "раб",
            Self::Material => "мат",
            Self::SubcontractLabor => "суб-раб",
            Self::SubcontractMaterial => "суб-мат",
            Self::Separator => "",
        }
    }

    /// Parses a row-type label as it appears in estimate sheets.
    ///
    /// Matching ignores surrounding whitespace and letter case. Returns
    /// `None` for anything that is not one of the known labels; an empty
    /// label is a `Separator`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "заказчик" => Some(Self::Header),
            "раб" => Some(Self::Labor),
            "мат" => Some(Self::Material),
            "суб-раб" => Some(Self::SubcontractLabor),
            "суб-мат" => Some(Self::SubcontractMaterial),
            "" => Some(Self::Separator),
            _ => None,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header)
    }

    /// Rows that produce a base monetary total.
    pub fn is_priced(&self) -> bool {
        match self {
            Self::Labor | Self::Material | Self::SubcontractLabor | Self::SubcontractMaterial => {
                true
            }
            Self::Header | Self::Separator => false,
        }
    }

    /// Rows priced by the unit labor price.
    pub fn is_labor_like(&self) -> bool {
        matches!(self, Self::Labor | Self::SubcontractLabor)
    }

    /// Rows priced by the unit material price with delivery.
    pub fn is_material_like(&self) -> bool {
        matches!(self, Self::Material | Self::SubcontractMaterial)
    }

    pub fn is_subcontract(&self) -> bool {
        matches!(self, Self::SubcontractLabor | Self::SubcontractMaterial)
    }
}

/// Material classification, meaningful only on material rows.
///
/// Primary materials are reported at cost in the materials column of the
/// commercial proposal; everything else folds into the works column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialKind {
    #[default]
    Unspecified,
    Primary,
    Auxiliary,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Primary => "основ",
            Self::Auxiliary => "вспом",
        }
    }

    /// Unknown labels are `Unspecified`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "основ" => Self::Primary,
            "вспом" => Self::Auxiliary,
            _ => Self::Unspecified,
        }
    }
}
