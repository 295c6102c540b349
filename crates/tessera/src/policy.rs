//! Primary-key policy for a descriptor.

mod accessor;
pub use accessor::{AccessorKind, KeyElementAccessor};

mod derive;

mod key_vector;

mod template;

use std::{
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use tessera_core::{
    reflect::{KeyType, Object, Registry},
    schema::{Descriptor, Mapping},
    Error, Result,
};

/// Derives and caches how a descriptor's primary key is read and written.
///
/// The policy is keyed to a single key shape: the first key type it is used
/// with (or the configured primary-key class) determines the cached
/// accessors for the lifetime of the policy.
pub struct KeyPolicy {
    descriptor: Arc<Descriptor>,

    /// Configured or inferred primary-key class
    pk_class: RwLock<Option<KeyType>>,

    /// Primary-key class name awaiting resolution through a registry
    pk_class_name: RwLock<Option<String>>,

    /// Accessors and mappings, computed on first use
    shape: OnceLock<KeyShape>,
}

/// Resolved accessors for one key shape.
#[derive(Debug)]
pub struct KeyShape {
    /// The key type the accessors were derived for
    key_type: KeyType,

    accessors: Vec<KeyElementAccessor>,

    /// Leaf mapping for each accessor; `mappings[i]` belongs to
    /// `accessors[i]`.
    mappings: Vec<Arc<Mapping>>,
}

impl KeyPolicy {
    pub fn new(descriptor: Arc<Descriptor>) -> KeyPolicy {
        let pk_class_name = descriptor.primary_key_class_name().map(str::to_string);

        KeyPolicy {
            descriptor,
            pk_class: RwLock::new(None),
            pk_class_name: RwLock::new(pk_class_name),
            shape: OnceLock::new(),
        }
    }

    pub fn descriptor(&self) -> &Arc<Descriptor> {
        &self.descriptor
    }

    pub fn set_primary_key_class_name(&self, name: impl Into<String>) {
        *write(&self.pk_class_name) = Some(name.into());
    }

    pub fn pk_class_name(&self) -> Option<String> {
        read(&self.pk_class_name).clone()
    }

    /// Sets the primary-key class. Has no effect on an already cached shape.
    pub fn set_pk_class(&self, key_type: impl Into<KeyType>) {
        *write(&self.pk_class) = Some(key_type.into());
    }

    /// Returns the primary-key class.
    ///
    /// When neither a class nor a class name is configured, the class is
    /// inferred by deriving scalar accessors. Returns `None` when only a
    /// class name is configured and it has not been resolved yet.
    pub fn pk_class(&self) -> Result<Option<KeyType>> {
        if let Some(key_type) = self.configured_pk_class() {
            return Ok(Some(key_type));
        }

        if self.pk_class_name().is_none() {
            self.initialize_primary_key_fields(None)?;
        }

        Ok(self.configured_pk_class())
    }

    /// Creates a blank instance of the primary-key class.
    ///
    /// Scalar key types have no blank instance and return `Ok(None)`;
    /// instantiation failures are returned as errors.
    pub fn pk_class_instance(&self) -> Result<Option<Object>> {
        match self.pk_class()? {
            Some(key_type) => key_type.new_instance(),
            None => Ok(None),
        }
    }

    /// Resolves the configured primary-key class name through `registry`.
    pub fn convert_class_names_to_classes(&self, registry: &Registry) -> Result<()> {
        let Some(name) = self.pk_class_name() else {
            return Ok(());
        };

        let key_type = registry
            .load(&name)
            .ok_or_else(|| Error::pk_class_not_found(&name))?;

        tracing::debug!(
            descriptor = self.descriptor.name(),
            pk_class = %name,
            "resolved primary key class"
        );
        self.set_pk_class(key_type);
        Ok(())
    }

    /// Derives one accessor per primary-key column for `key_type`.
    ///
    /// `None` means the key is a bare scalar; the primary-key class is then
    /// set to the classification of the key attribute. The same happens when
    /// a single-column key is paired with a key type lacking a matching
    /// field or getter.
    pub fn initialize_primary_key_fields(
        &self,
        key_type: Option<&KeyType>,
    ) -> Result<Vec<KeyElementAccessor>> {
        let derived = derive::derive_accessors(&self.descriptor, key_type)?;

        if let Some(pk_class) = derived.pk_class {
            self.set_pk_class(pk_class);
        }

        Ok(derived.accessors)
    }

    /// Returns the cached key shape, deriving it on first use.
    ///
    /// The configured primary-key class takes precedence over `observed`,
    /// the runtime type of the key at hand. Concurrent first callers may
    /// each derive a shape; the first one published wins.
    pub fn key_shape(&self, observed: &KeyType) -> Result<&KeyShape> {
        if let Some(shape) = self.shape.get() {
            return Ok(shape);
        }

        let key_type = self
            .configured_pk_class()
            .unwrap_or_else(|| observed.clone());
        let accessors = self.initialize_primary_key_fields(Some(&key_type))?;
        let mappings = accessors
            .iter()
            .map(|accessor| self.leaf_mapping(accessor))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            descriptor = self.descriptor.name(),
            key_type = %key_type.name(),
            elements = accessors.len(),
            "derived primary key shape"
        );

        let shape = KeyShape {
            key_type,
            accessors,
            mappings,
        };
        Ok(self.shape.get_or_init(|| shape))
    }

    /// Returns the cached accessors, deriving them for `observed` on first
    /// use.
    pub fn key_class_fields(&self, observed: &KeyType) -> Result<&[KeyElementAccessor]> {
        Ok(self.key_shape(observed)?.accessors())
    }

    /// Returns the cached key mappings, if the shape has been derived.
    pub fn key_mappings(&self) -> Option<&[Arc<Mapping>]> {
        self.shape.get().map(KeyShape::mappings)
    }

    fn configured_pk_class(&self) -> Option<KeyType> {
        read(&self.pk_class).clone()
    }

    /// Resolves the mapping that stores an accessor's element, descending
    /// through aggregates.
    fn leaf_mapping(&self, accessor: &KeyElementAccessor) -> Result<Arc<Mapping>> {
        let mut mapping = element_mapping(&self.descriptor, accessor)?.clone();

        while let Some(nested) = mapping.reference_descriptor() {
            let next = element_mapping(nested, accessor)?.clone();
            mapping = next;
        }

        Ok(mapping)
    }

    /// Wraps `cause` as a failure using `subject` as a key. Failures that
    /// already carry that context are returned as is.
    fn error_using_key(&self, subject: &impl fmt::Debug, cause: Error) -> Error {
        if cause.is_error_using_primary_key() {
            return cause;
        }

        cause.context(Error::error_using_primary_key(
            format!("{subject:?}"),
            self.descriptor.name(),
        ))
    }
}

impl fmt::Debug for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPolicy")
            .field("descriptor", &self.descriptor.name())
            .field("pk_class", &self.configured_pk_class())
            .field("pk_class_name", &self.pk_class_name())
            .field("shape", &self.shape.get())
            .finish()
    }
}

impl KeyShape {
    pub fn key_type(&self) -> &KeyType {
        &self.key_type
    }

    pub fn accessors(&self) -> &[KeyElementAccessor] {
        &self.accessors
    }

    pub fn mappings(&self) -> &[Arc<Mapping>] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    /// True when the key is a bare scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(self.accessors.as_slice(), [accessor] if accessor.is_key_is_element())
    }

    /// Accessors paired with their mappings, in column order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&KeyElementAccessor, &Arc<Mapping>)> {
        self.accessors.iter().zip(self.mappings.iter())
    }
}

/// The mapping for an accessor's attribute in `descriptor`, falling back to
/// the mapping for its column.
fn element_mapping<'a>(
    descriptor: &'a Descriptor,
    accessor: &KeyElementAccessor,
) -> Result<&'a Arc<Mapping>> {
    descriptor
        .mapping_for_attribute_name(accessor.attribute_name())
        .or_else(|| descriptor.mapping_for_field(accessor.column()))
        .ok_or_else(|| {
            tessera_core::err!(
                "descriptor `{}` has no mapping for attribute `{}` or column {}",
                descriptor.name(),
                accessor.attribute_name(),
                accessor.column()
            )
        })
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
