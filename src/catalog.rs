use crate::types::{Object, ObjectType};

/// A typed view of one object version and kind inside a flat [`Object`] pool.
pub trait Cataloged: Sized {
    /// The version and kind this type represents.
    const OBJECT_TYPE: ObjectType;

    /// Returns the typed object if `object` is of this version and kind.
    fn from_object(object: &Object) -> Option<&Self>;

    /// Wraps the typed object back into the generic [`Object`].
    fn into_object(self) -> Object;
}

/// Finds the first object named `name` that is also of type `T`.
///
/// Objects sharing the name but having another kind or version are skipped,
/// so a reference to a wrong-kind object is indistinguishable from a missing
/// one. Returns the index of the match in `objects`.
pub fn find_object<'a, T: Cataloged>(
    objects: &'a [Object],
    name: &str,
) -> Option<(usize, &'a T)> {
    objects.iter().enumerate().find_map(|(i, object)| {
        if object.name() != name {
            return None;
        }
        T::from_object(object).map(|typed| (i, typed))
    })
}

/// Returns every object of type `T`, preserving order.
pub fn filter_by_kind<T: Cataloged>(objects: &[Object]) -> Vec<&T> {
    objects.iter().filter_map(T::from_object).collect()
}

/// Name and kind scoped lookup over a borrowed object pool.
///
/// Lookups are linear scans; pools are a single document's worth of objects.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    objects: &'a [Object],
}

impl<'a> Catalog<'a> {
    pub fn new(objects: &'a [Object]) -> Self {
        Self { objects }
    }

    pub fn objects(&self) -> &'a [Object] {
        self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Typed lookup, see [`find_object`].
    pub fn lookup<T: Cataloged>(&self, name: &str) -> Option<(usize, &'a T)> {
        find_object(self.objects, name)
    }

    /// Untyped lookup by version, kind and name.
    pub fn lookup_any(&self, object_type: ObjectType, name: &str) -> Option<(usize, &'a Object)> {
        self.objects
            .iter()
            .enumerate()
            .find(|(_, o)| o.name() == name && o.object_type() == object_type)
    }
}
