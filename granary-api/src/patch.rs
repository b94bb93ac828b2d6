use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
///
/// `Absent` means the caller did not mention the field at all, while
/// `Present(None)` means the caller explicitly supplied `null`. Struct fields
/// of this type must carry `#[serde(default, skip_serializing_if = "Patch::is_absent")]`
/// so that a missing key deserializes to `Absent`.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Present(Option<T>),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Overwrites `target` only when the field was supplied.
    pub fn apply_to(self, target: &mut Option<T>) {
        if let Patch::Present(value) = self {
            *target = value;
        }
    }

    /// The value used when the field seeds a brand new record.
    pub fn into_value(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Present(value) => value,
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Present(Some(value))
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        Patch::Present(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Absent => serializer.serialize_none(),
            Patch::Present(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::Present)
    }
}
