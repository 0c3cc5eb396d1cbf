use bitflags::bitflags;

bitflags! {
    /// Access permissions granted by the /P entry of the encryption dictionary.
    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    pub struct Permissions: u64 {
        /// (Security handlers of revision 2) Print the document.
        /// (Security handlers of revision 3 or greater) Print the document (possibly not at the
        /// highest quality level, depending on whether [`Permissions::PRINTABLE_IN_HIGH_QUALITY`]
        /// is also set).
        const PRINTABLE = 1 << 2;

        /// Modify the contents of the document by operations other than those controlled by
        /// [`Permissions::ANNOTABLE`], [`Permissions::FILLABLE`] and [`Permissions::ASSEMBLABLE`].
        const MODIFIABLE = 1 << 3;

        /// Copy or otherwise extract text and graphics from the document.
        const COPYABLE = 1 << 4;

        /// Add or modify text annotations, fill in interactive form fields, and if
        /// [`Permissions::MODIFIABLE`] is also set, create or modify interactive form fields
        /// (including signature fields).
        const ANNOTABLE = 1 << 5;

        /// Fill in existing interactive fields (including signature fields), even if
        /// [`Permissions::ANNOTABLE`] is clear.
        const FILLABLE = 1 << 8;

        /// Copy or otherwise extract text and graphics from the document for the purpose of
        /// providing this content to assistive technology.
        const COPYABLE_FOR_ACCESSIBILITY = 1 << 9;

        /// (Security handlers of revision 3 or greater) Assemble the document (insert, rotate, or
        /// delete pages and create document outline items or thumbnail images), even if
        /// [`Permissions::MODIFIABLE`] is not set.
        const ASSEMBLABLE = 1 << 10;

        /// (Security handlers of revision 3 or greater) Print the document to a representation
        /// from which a faithful copy of the content could be generated.
        const PRINTABLE_IN_HIGH_QUALITY = 1 << 11;

        // Bits 7-8 and 13-32 are reserved and carried verbatim. Bits above 32 only appear in
        // the owner sentinel.
        const _ = !0;
    }
}

impl Permissions {
    /// Unrestricted access, granted to whoever authenticates with the owner password.
    ///
    /// Sets the bits above the 32 bits of /P, so no stored value, not even /P -1, equals this one.
    pub const OWNER: Self = Self::from_bits_retain(u64::MAX);

    /// Reads the signed /P entry, keeping every bit as stored.
    pub fn from_p(p: i32) -> Self {
        Self::from_bits_retain(p as u32 as u64)
    }

    /// The signed /P entry for a new encryption dictionary: the named flags plus the reserved bits
    /// 7-8 and 13-32, which must be 1.
    pub fn p_value(&self) -> i32 {
        let named = (self.bits() & Self::user_flags().bits()) as u32;
        (named | (0b11 << 6) | (0xfffff << 12)) as i32
    }

    /// Every named capability.
    pub fn user_flags() -> Self {
        Self::PRINTABLE
            | Self::MODIFIABLE
            | Self::COPYABLE
            | Self::ANNOTABLE
            | Self::FILLABLE
            | Self::COPYABLE_FOR_ACCESSIBILITY
            | Self::ASSEMBLABLE
            | Self::PRINTABLE_IN_HIGH_QUALITY
    }

    pub fn is_owner(&self) -> bool {
        *self == Self::OWNER
    }

    /// Whether every capability in `flags` is granted.
    pub fn allows(&self, flags: Permissions) -> bool {
        self.is_owner() || self.contains(flags)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::user_flags()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Permissions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Permissions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

#[cfg(test)]
mod tests {
    use super::Permissions;

    #[test]
    fn p_value_sets_reserved_bits() {
        assert_eq!(Permissions::empty().p_value(), -3904);
        assert_eq!(Permissions::user_flags().p_value(), -4);
        assert_eq!(Permissions::PRINTABLE.p_value(), -3900);
    }

    #[test]
    fn from_p_keeps_bits() {
        let permissions = Permissions::from_p(-3900);
        assert_eq!(permissions.bits(), 0xfffff0c4);
        assert!(permissions.allows(Permissions::PRINTABLE));
        assert!(!permissions.allows(Permissions::COPYABLE));
        assert!(!permissions.is_owner());
        assert_eq!(permissions.p_value(), -3900);
    }

    #[test]
    fn owner_allows_everything() {
        assert!(Permissions::OWNER.is_owner());
        assert!(Permissions::OWNER.allows(Permissions::user_flags()));
        assert_ne!(Permissions::from_p(-4), Permissions::OWNER);
        assert_ne!(Permissions::from_p(Permissions::user_flags().p_value()), Permissions::OWNER);
    }

    #[test]
    fn unrestricted_p_is_not_owner() {
        let permissions = Permissions::from_p(-1);
        assert_eq!(permissions.bits(), 0xffff_ffff);
        assert_ne!(permissions, Permissions::OWNER);
        assert!(!permissions.is_owner());
        assert!(permissions.allows(Permissions::user_flags()));
        assert_eq!(permissions.p_value(), -4);
    }
}
