use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundStatus {
    Open,
    Closed,
    Maintenance,
}

impl GroundStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityKind {
    Restaurant,
    Parking,
    Hotel,
    Hospital,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub name: String,
    /// Display distance, e.g. "0.5 km".
    pub distance: String,
    #[serde(rename = "type")]
    pub kind: AmenityKind,
}

/// A venue where matches are played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ground {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub capacity: u32,
    pub status: GroundStatus,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub booking_fee: u32,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub map_url: String,
    /// Match ids. Not checked against the match collection.
    #[serde(default)]
    pub upcoming_matches: Vec<String>,
    #[serde(default)]
    pub nearby_amenities: Vec<Amenity>,
}

impl Ground {
    pub fn is_open(&self) -> bool {
        self.status == GroundStatus::Open
    }

    pub fn amenities_of(&self, kind: AmenityKind) -> impl Iterator<Item = &Amenity> {
        self.nearby_amenities.iter().filter(move |a| a.kind == kind)
    }
}
