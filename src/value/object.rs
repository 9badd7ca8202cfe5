//! Keyed values with prototype delegation and constructor tags.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use super::Value;

/// Identifies the constructor that built an [`Object`].
///
/// Constructors are keyed by a Rust type, so a module can keep its tag type
/// private and be sure no other code produces look-alike instances.
///
/// # Examples
///
/// ```rust
/// use duckfp::value::{Constructor, Object};
///
/// struct Point;
///
/// let point = Object::builder()
///     .constructor(Constructor::of::<Point>("Point"))
///     .member("x", 1)
///     .build();
/// assert!(point.is_instance_of(Constructor::of::<Point>("Point")));
/// let look_alike = Object::builder().member("x", 1).build();
/// assert!(!look_alike.is_instance_of(Constructor::of::<Point>("Point")));
/// ```
#[derive(Clone, Copy)]
pub struct Constructor {
    type_id: TypeId,
    name: &'static str,
}

impl Constructor {
    /// The constructor keyed by `T`.
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name,
        }
    }

    /// A human-readable name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Constructor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Constructor {}

impl Hash for Constructor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// A keyed structure.
///
/// Own members keep insertion order. Lookups through [`Object::get`] fall
/// back to the prototype chain; [`Object::own`] and [`Object::own_entries`]
/// never do. Objects are immutable; [`Object::with`] returns a new object.
///
/// Equality on objects is identity (see [`Object::ptr_eq`]).
#[derive(Clone)]
pub struct Object(Arc<ObjectData>);

#[derive(Clone, Default)]
struct ObjectData {
    members: Vec<(Arc<str>, Value)>,
    prototype: Option<Object>,
    constructor: Option<Constructor>,
}

/// A non-owning handle to an [`Object`], used by members that must return
/// the object they belong to.
#[derive(Clone)]
pub struct WeakObject(Weak<ObjectData>);

impl WeakObject {
    /// Returns the object if it is still alive.
    pub fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }
}

impl Object {
    /// Creates an empty object with no prototype.
    pub fn new() -> Self {
        Self(Arc::new(ObjectData::default()))
    }

    /// Starts building an object.
    pub fn builder() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    /// Returns a copy with `name` set to `value`.
    ///
    /// An existing own member keeps its position.
    #[must_use]
    pub fn with(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        let mut data = (*self.0).clone();
        assign(&mut data.members, name.into(), value.into());
        Self(Arc::new(data))
    }

    /// Looks up an own member.
    pub fn own(&self, name: &str) -> Option<&Value> {
        self.0
            .members
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| value)
    }

    /// Looks up a member, delegating to the prototype chain.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut current = Some(self);
        while let Some(object) = current {
            if let Some(value) = object.own(name) {
                return Some(value);
            }
            current = object.prototype();
        }
        None
    }

    /// Iterates own members in insertion order.
    pub fn own_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.members.iter().map(|(key, value)| (&**key, value))
    }

    /// Number of own members.
    pub fn len(&self) -> usize {
        self.0.members.len()
    }

    /// Returns `true` if the object has no own members.
    pub fn is_empty(&self) -> bool {
        self.0.members.is_empty()
    }

    /// The object this one delegates to.
    pub fn prototype(&self) -> Option<&Self> {
        self.0.prototype.as_ref()
    }

    /// The constructor that built this object.
    pub fn constructor(&self) -> Option<Constructor> {
        self.0.constructor
    }

    /// Returns `true` if this object was built by `constructor`.
    pub fn is_instance_of(&self, constructor: Constructor) -> bool {
        self.0.constructor == Some(constructor)
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

fn assign(members: &mut Vec<(Arc<str>, Value)>, name: Arc<str>, value: Value) {
    match members.iter_mut().find(|(key, _)| *key == name) {
        Some((_, slot)) => *slot = value,
        None => members.push((name, value)),
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<Arc<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterator: I) -> Self {
        iterator
            .into_iter()
            .fold(Self::builder(), |builder, (key, value)| builder.member(key, value))
            .build()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(constructor) = self.constructor() {
            formatter.write_str(constructor.name())?;
            formatter.write_str(" ")?;
        }
        formatter.debug_map().entries(self.own_entries()).finish()
    }
}

/// Builder for [`Object`].
#[derive(Default)]
pub struct ObjectBuilder {
    data: ObjectData,
}

impl ObjectBuilder {
    /// Sets an own member; later assignments to the same name win.
    #[must_use]
    pub fn member(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        assign(&mut self.data.members, name.into(), value.into());
        self
    }

    /// Sets the prototype.
    #[must_use]
    pub fn prototype(mut self, prototype: Object) -> Self {
        self.data.prototype = Some(prototype);
        self
    }

    /// Tags the object with its constructor.
    #[must_use]
    pub const fn constructor(mut self, constructor: Constructor) -> Self {
        self.data.constructor = Some(constructor);
        self
    }

    /// Finishes the object.
    pub fn build(self) -> Object {
        Object(Arc::new(self.data))
    }

    /// Finishes the object, letting `members` capture a weak handle to it.
    ///
    /// Members produced by `members` are appended after those already set.
    pub fn build_cyclic<F, I, K>(self, members: F) -> Object
    where
        F: FnOnce(&WeakObject) -> I,
        I: IntoIterator<Item = (K, Value)>,
        K: Into<Arc<str>>,
    {
        let mut data = self.data;
        Object(Arc::new_cyclic(move |weak| {
            for (name, value) in members(&WeakObject(weak.clone())) {
                assign(&mut data.members, name.into(), value);
            }
            data
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Tag;
    struct OtherTag;

    #[rstest]
    fn own_ignores_prototype_but_get_delegates() {
        let prototype = Object::builder().member("greet", "hello").build();
        let object = Object::builder().prototype(prototype).member("x", 1).build();

        assert_eq!(object.own("greet"), None);
        assert_eq!(object.get("greet"), Some(&Value::from("hello")));
        assert_eq!(object.own("x"), Some(&Value::from(1)));
    }

    #[rstest]
    fn with_keeps_position_and_original() {
        let object: Object = [("a", 1), ("b", 2)].into_iter().collect();
        let updated = object.with("a", 3).with("c", 4);

        let keys: Vec<&str> = updated.own_entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(updated.own("a"), Some(&Value::from(3)));
        assert_eq!(object.own("a"), Some(&Value::from(1)));
    }

    #[rstest]
    fn constructor_identity_is_by_type() {
        let object = Object::builder()
            .constructor(Constructor::of::<Tag>("Tag"))
            .build();
        assert!(object.is_instance_of(Constructor::of::<Tag>("Renamed")));
        assert!(!object.is_instance_of(Constructor::of::<OtherTag>("Tag")));
    }

    #[rstest]
    fn cyclic_members_can_reach_their_object() {
        let object = Object::builder().build_cyclic(|this| {
            let this = this.clone();
            [(
                "itself",
                Value::from(crate::value::Function::nullary(move || {
                    Ok(this.upgrade().map_or(Value::Undefined, Value::from))
                })),
            )]
        });

        let returned = object.own("itself").unwrap().call(&[]).unwrap();
        assert!(returned.as_object().unwrap().ptr_eq(&object));
    }
}
