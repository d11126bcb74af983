//! Port descriptors and the entity port table.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The direction of a port as seen from the instantiated unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Driven by the testbench.
    In,
    /// Driven by the unit.
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "IN"),
            Direction::Out => write!(f, "OUT"),
        }
    }
}

/// Whether a port is a single bit or a bus.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    /// `std_logic`.
    Scalar,
    /// `std_logic_vector(...)`.
    Vector,
}

/// Bit ordering of a vector port's range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorOrder {
    /// `<lo> to <hi>`.
    Ascending,
    /// `<hi> downto <lo>`.
    Descending,
}

impl VectorOrder {
    /// The VHDL keyword for this ordering.
    pub fn keyword(self) -> &'static str {
        match self {
            VectorOrder::Ascending => "to",
            VectorOrder::Descending => "downto",
        }
    }

    /// Maps a range keyword to an ordering. Only `to` and `downto` are recognized.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "to" => Some(VectorOrder::Ascending),
            "downto" => Some(VectorOrder::Descending),
            _ => None,
        }
    }
}

/// The range of a vector port, as written: `(<left> <keyword> <right>)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct VectorRange {
    /// Ascending or descending.
    pub order: VectorOrder,
    /// The bound written before the keyword.
    pub left: u32,
    /// The bound written after the keyword.
    pub right: u32,
}

impl VectorRange {
    /// Number of bits covered by the range: `|left - right| + 1`.
    ///
    /// For well-formed ranges this equals `right - left + 1` when ascending and
    /// `left - right + 1` when descending. A range written against its own
    /// direction (a VHDL null range) still reports a positive width.
    pub fn width(&self) -> u32 {
        self.left.abs_diff(self.right).saturating_add(1)
    }
}

impl fmt::Display for VectorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.order.keyword(), self.right)
    }
}

/// Scalar ports have no range; vector ports always have one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PortShape {
    /// A single-bit port.
    Scalar,
    /// A bus with an explicit range.
    Vector(VectorRange),
}

/// One declared port of the exported entity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PortDescriptor {
    /// The identifier exactly as written in the source (trimmed).
    pub declared_name: String,
    /// The testbench-local signal name, filled in by the naming rule.
    pub local_name: String,
    /// Port direction.
    pub direction: Direction,
    /// Scalar or vector with range.
    pub shape: PortShape,
}

impl PortDescriptor {
    /// Creates a descriptor whose local name has not been resolved yet.
    pub fn unresolved(declared_name: impl Into<String>, direction: Direction, shape: PortShape) -> Self {
        Self {
            declared_name: declared_name.into(),
            local_name: String::new(),
            direction,
            shape,
        }
    }

    /// Scalar or vector.
    pub fn kind(&self) -> PortKind {
        match self.shape {
            PortShape::Scalar => PortKind::Scalar,
            PortShape::Vector(_) => PortKind::Vector,
        }
    }

    /// Bus width, or `None` for scalar ports.
    pub fn width(&self) -> Option<u32> {
        match self.shape {
            PortShape::Scalar => None,
            PortShape::Vector(range) => Some(range.width()),
        }
    }

    /// Range ordering, or `None` for scalar ports.
    pub fn vector_order(&self) -> Option<VectorOrder> {
        match self.shape {
            PortShape::Scalar => None,
            PortShape::Vector(range) => Some(range.order),
        }
    }

    /// The VHDL type name of this port.
    pub fn type_name(&self) -> &'static str {
        match self.shape {
            PortShape::Scalar => "std_logic",
            PortShape::Vector(_) => "std_logic_vector",
        }
    }
}

impl fmt::Display for PortDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:40} -> {:40}, {}, {}",
            self.declared_name,
            self.local_name,
            self.direction,
            self.type_name()
        )?;
        if let Some(width) = self.width() {
            write!(f, ", {width}")?;
        }
        Ok(())
    }
}

impl Serialize for PortDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PortDescriptor", 6)?;
        s.serialize_field("declared_name", &self.declared_name)?;
        s.serialize_field("local_name", &self.local_name)?;
        s.serialize_field("direction", &self.direction)?;
        s.serialize_field("kind", &self.kind())?;
        s.serialize_field("vector_order", &self.vector_order())?;
        s.serialize_field("width", &self.width())?;
        s.end()
    }
}

/// Ports keyed by declared name, in declaration order.
///
/// Re-inserting an existing name replaces the descriptor but keeps the
/// original position.
pub type EntityPortTable = IndexMap<String, PortDescriptor>;

/// A parsed entity: its name and its port table.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Entity {
    /// The entity name from the `entity <name> is` line.
    pub name: String,
    /// The declared ports.
    pub ports: EntityPortTable,
}

impl Entity {
    /// Number of ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns `true` if the entity declares no ports.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Looks up a port by declared name.
    pub fn port(&self, declared_name: &str) -> Option<&PortDescriptor> {
        self.ports.get(declared_name)
    }

    /// Iterates ports in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PortDescriptor> {
        self.ports.values()
    }

    /// Declared names in declaration order.
    pub fn declared_names(&self) -> Vec<&str> {
        self.ports.keys().map(String::as_str).collect()
    }
}
