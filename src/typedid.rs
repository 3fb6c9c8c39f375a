use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use serde::Serialize;
use uuid::Uuid;

/// Gives a typed id its short prefix, e.g. `WFL` for workflows.
pub trait TypedIdMarker {
    fn tag() -> &'static str;
}

/// A uuid that renders as `TAG-UUID`.
pub struct TypedId<T: TypedIdMarker> {
    uuid: Uuid,
    marker: PhantomData<fn() -> T>,
}

impl<T: TypedIdMarker> TypedId<T> {
    pub fn new() -> TypedId<T> {
        TypedId::from_uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> TypedId<T> {
        TypedId {
            uuid,
            marker: PhantomData,
        }
    }
}

impl<T: TypedIdMarker> Default for TypedId<T> {
    fn default() -> TypedId<T> {
        TypedId::new()
    }
}

impl<T: TypedIdMarker> Copy for TypedId<T> {}

impl<T: TypedIdMarker> Clone for TypedId<T> {
    fn clone(&self) -> TypedId<T> {
        *self
    }
}

impl<T: TypedIdMarker> PartialEq for TypedId<T> {
    fn eq(&self, other: &TypedId<T>) -> bool {
        self.uuid == other.uuid
    }
}

impl<T: TypedIdMarker> Eq for TypedId<T> {}

impl<T: TypedIdMarker> Display for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}-{}", T::tag(), self.uuid.hyphenated().encode_upper(&mut Uuid::encode_buffer()))
    }
}

impl<T: TypedIdMarker> Debug for TypedId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl<T: TypedIdMarker> Serialize for TypedId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Draft;

    impl TypedIdMarker for Draft {
        fn tag() -> &'static str {
            "DRF"
        }
    }

    #[test]
    fn renders_tag_and_uppercase_uuid() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let id = TypedId::<Draft>::from_uuid(uuid);

        assert_eq!(id.to_string(), "DRF-67E55044-10B1-426F-9247-BB680E5FE0C8");
        assert_eq!(format!("{:?}", id), id.to_string());
    }

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(TypedId::<Draft>::new(), TypedId::<Draft>::new());
    }

    #[test]
    fn serializes_as_string() {
        let id = TypedId::<Draft>::new();

        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, format!("\"{}\"", id));
    }
}
