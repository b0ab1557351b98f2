//! Die faces, including the wildcard spark.

/// The face a die currently shows.
///
/// Pip faces carry their numeric value. [`Face::Spark`] is the wildcard face
/// produced by the `SparkFace` upgrade; the scoring evaluator resolves it to
/// whatever the surrounding dice need.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Face {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Spark,
}

impl Face {
    /// The six pip faces in ascending order.
    pub const PIPS: [Face; 6] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    pub const fn from_pip(pip: u8) -> Option<Self> {
        match pip {
            1 => Some(Face::One),
            2 => Some(Face::Two),
            3 => Some(Face::Three),
            4 => Some(Face::Four),
            5 => Some(Face::Five),
            6 => Some(Face::Six),
            _ => None,
        }
    }

    /// Numeric value, `None` for the spark.
    pub const fn pip(self) -> Option<u8> {
        match self {
            Face::One => Some(1),
            Face::Two => Some(2),
            Face::Three => Some(3),
            Face::Four => Some(4),
            Face::Five => Some(5),
            Face::Six => Some(6),
            Face::Spark => None,
        }
    }

    pub const fn is_spark(self) -> bool {
        matches!(self, Face::Spark)
    }
}
