use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// A record type whose fields can be mapped to storage.
///
/// Usually implemented with `#[derive(Model)]`.
pub trait Model: 'static {
    /// Describes the type's fields, their declared shapes and annotations.
    fn describe() -> ModelDescriptor;

    fn model_ref() -> ModelRef
    where
        Self: Sized,
    {
        ModelRef::of::<Self>()
    }
}

/// Declared shape of a field's type, computed from the Rust type.
pub trait FieldType {
    fn shape() -> Shape;
}

/// Identity of a model type.
///
/// Holding a `ModelRef` does not describe the model; the descriptor is only
/// produced on demand, so models may reference themselves or each other.
#[derive(Clone, Copy)]
pub struct ModelRef {
    id: TypeId,
    name: &'static str,
    describe: fn() -> ModelDescriptor,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A plain storage value
    Scalar,

    /// A single model, held by value (`by_ref == false`) or behind a pointer
    One { target: ModelRef, by_ref: bool },

    /// A collection of models
    Many { target: ModelRef, by_ref: bool },
}

#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Type name as written in the source
    pub name: String,

    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub shape: Shape,

    /// Raw annotation string, e.g. `column:my_id;rel:belongs_to`
    pub annotation: Option<String>,
}

impl ModelRef {
    pub fn of<T: Model>() -> ModelRef {
        ModelRef {
            id: TypeId::of::<T>(),
            name: short_name(std::any::type_name::<T>()),
            describe: <T as Model>::describe,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Short type name without path or generic arguments. Diagnostics about
    /// a model's contents use the descriptor's name instead.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn describe(&self) -> ModelDescriptor {
        (self.describe)()
    }
}

/// `a::b::Wrapper<c::D>` → `Wrapper`
fn short_name(full: &'static str) -> &'static str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelRef {}

impl Hash for ModelRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelRef({})", self.name)
    }
}

impl Shape {
    pub fn one(target: ModelRef) -> Shape {
        Shape::One {
            target,
            by_ref: false,
        }
    }

    pub fn many(target: ModelRef) -> Shape {
        Shape::Many {
            target,
            by_ref: false,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Shape::Scalar)
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Shape::Many { .. })
    }

    /// The referenced model, if the shape is not a scalar.
    pub fn target(&self) -> Option<ModelRef> {
        match self {
            Shape::Scalar => None,
            Shape::One { target, .. } | Shape::Many { target, .. } => Some(*target),
        }
    }

    fn by_ref(self) -> Shape {
        match self {
            Shape::One { target, .. } => Shape::One {
                target,
                by_ref: true,
            },
            shape => shape,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => f.write_str("Scalar"),
            Shape::One { target, by_ref } => {
                write!(f, "One({}{})", if *by_ref { "&" } else { "" }, target.name)
            }
            Shape::Many { target, by_ref } => {
                write!(f, "Many({}{})", if *by_ref { "&" } else { "" }, target.name)
            }
        }
    }
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> ModelDescriptor {
        ModelDescriptor {
            name: name.into(),
            fields: vec![],
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> ModelDescriptor {
        self.fields.push(field);
        self
    }
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, shape: Shape) -> FieldDescriptor {
        FieldDescriptor {
            name: name.into(),
            shape,
            annotation: None,
        }
    }

    pub fn annotation(mut self, raw: impl Into<String>) -> FieldDescriptor {
        self.annotation = Some(raw.into());
        self
    }
}

macro_rules! impl_scalar {
    ( $($t:ty),+ ) => {
        $(
            impl FieldType for $t {
                fn shape() -> Shape {
                    Shape::Scalar
                }
            }
        )+
    };
}

impl_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
    &'static str
);

impl<T: FieldType> FieldType for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }
}

impl<T: FieldType> FieldType for Box<T> {
    fn shape() -> Shape {
        T::shape().by_ref()
    }
}

impl<T: FieldType> FieldType for Rc<T> {
    fn shape() -> Shape {
        T::shape().by_ref()
    }
}

impl<T: FieldType> FieldType for Arc<T> {
    fn shape() -> Shape {
        T::shape().by_ref()
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn shape() -> Shape {
        match T::shape() {
            Shape::One { target, by_ref } => Shape::Many { target, by_ref },
            // Byte buffers and nested collections are stored as opaque values
            Shape::Scalar | Shape::Many { .. } => Shape::Scalar,
        }
    }
}
