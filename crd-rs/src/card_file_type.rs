/// The two Cardfile formats, told apart by the first three bytes of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFileType {
    /// `RRG` files, which may hold OLE objects.
    Rrg,
    /// `MGC` files, which may hold a bitmap per card.
    Mgc,
}

impl CardFileType {
    pub const RRG_SIGNATURE: [u8; 3] = *b"RRG";
    pub const MGC_SIGNATURE: [u8; 3] = *b"MGC";

    /// Matches a signature exactly, case-sensitive.
    pub fn from_signature(signature: &[u8; 3]) -> Option<Self> {
        match *signature {
            Self::RRG_SIGNATURE => Some(CardFileType::Rrg),
            Self::MGC_SIGNATURE => Some(CardFileType::Mgc),
            _ => None,
        }
    }

    pub fn signature(self) -> [u8; 3] {
        match self {
            CardFileType::Rrg => Self::RRG_SIGNATURE,
            CardFileType::Mgc => Self::MGC_SIGNATURE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CardFileType::Rrg => "RRG",
            CardFileType::Mgc => "MGC",
        }
    }
}
