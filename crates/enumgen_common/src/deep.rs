//! Independent structural copies.

/// Produces a structurally equal copy that shares no reference-counted
/// handles with the original.
///
/// For plain values this is [`Clone`]; for handle types with identity
/// equality the copy is a distinct object, so it compares unequal to the
/// original handle while its contents compare equal.
pub trait DeepClone {
    /// Returns the independent copy.
    fn deep_clone(&self) -> Self;
}

macro_rules! clone_deep {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepClone for $ty {
                fn deep_clone(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

clone_deep!(bool, char, u8, u16, u32, u64, i8, i16, i32, i64, i128, usize, String);

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone(&self) -> Self {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> Self {
        self.as_ref().map(DeepClone::deep_clone)
    }
}
