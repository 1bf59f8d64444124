//! Per-block-type state axes and the immutable state instances built against them.
//!
//! A block type declares its axes once through a [`StateAllocator`], which hands back typed
//! [`StateKey`]s and is then frozen into a read-only [`StateSchema`]. Instances are only
//! constructible through a [`StateBuilder`], so every live [`StateInstance`] holds in-domain
//! values for every axis.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::StateError;

/// Closed, ordered value set of one axis. Values are stored raw as `i32`
/// (the integer itself, an enum ordinal, or 0/1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisDomain {
    Integer { min: i32, max: i32 },
    Enum { names: &'static [&'static str] },
    Bool,
}

impl AxisDomain {
    pub fn raw_range(&self) -> RangeInclusive<i32> {
        match self {
            AxisDomain::Integer { min, max } => *min..=*max,
            AxisDomain::Enum { names } => 0..=(names.len() as i32 - 1),
            AxisDomain::Bool => 0..=1,
        }
    }

    #[inline]
    pub fn contains(&self, raw: i32) -> bool {
        self.raw_range().contains(&raw)
    }

    pub fn len(&self) -> usize {
        let r = self.raw_range();
        if r.is_empty() {
            0
        } else {
            (i64::from(*r.end()) - i64::from(*r.start()) + 1) as usize
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses the textual form of a value. Integers are not range-checked here.
    pub fn parse(&self, text: &str) -> Option<i32> {
        match self {
            AxisDomain::Integer { .. } => text.trim().parse().ok(),
            AxisDomain::Enum { names } => names.iter().position(|n| *n == text).map(|i| i as i32),
            AxisDomain::Bool => match text {
                "true" => Some(1),
                "false" => Some(0),
                _ => None,
            },
        }
    }

    pub fn format(&self, raw: i32) -> String {
        match self {
            AxisDomain::Integer { .. } => raw.to_string(),
            AxisDomain::Enum { names } => usize::try_from(raw)
                .ok()
                .and_then(|i| names.get(i))
                .map(|s| s.to_string())
                .unwrap_or_else(|| raw.to_string()),
            AxisDomain::Bool => (raw != 0).to_string(),
        }
    }
}

/// Rust-side type of an axis value.
pub trait StateValue: Copy + 'static {
    fn to_raw(self) -> i32;
    /// Only called with raws already validated against the axis domain.
    fn from_raw(raw: i32) -> Self;
}

impl StateValue for i32 {
    #[inline]
    fn to_raw(self) -> i32 {
        self
    }
    #[inline]
    fn from_raw(raw: i32) -> Self {
        raw
    }
}

impl StateValue for bool {
    #[inline]
    fn to_raw(self) -> i32 {
        self as i32
    }
    #[inline]
    fn from_raw(raw: i32) -> Self {
        raw != 0
    }
}

/// Enumerated axis value; `NAMES[i]` labels the variant whose raw value is `i`.
pub trait StateEnum: StateValue {
    const NAMES: &'static [&'static str];
}

/// Typed handle to one axis of one block type's schema.
pub struct StateKey<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StateKey<T> {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for StateKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StateKey<T> {}

impl<T> fmt::Debug for StateKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateKey").field(&self.index).finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateAxis {
    pub name: String,
    pub domain: AxisDomain,
}

/// Append-only axis registry used while a block type is being declared.
#[derive(Default, Debug)]
pub struct StateAllocator {
    axes: Vec<StateAxis>,
    index: HashMap<String, usize>,
}

impl StateAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc<T: StateValue>(
        &mut self,
        name: &str,
        domain: AxisDomain,
    ) -> Result<StateKey<T>, StateError> {
        if self.index.contains_key(name) {
            return Err(StateError::DuplicateAxis(name.to_string()));
        }
        if domain.is_empty() {
            return Err(StateError::EmptyDomain(name.to_string()));
        }
        let index = self.axes.len();
        self.axes.push(StateAxis {
            name: name.to_string(),
            domain,
        });
        self.index.insert(name.to_string(), index);
        Ok(StateKey {
            index,
            _marker: PhantomData,
        })
    }

    /// Integer axis over the inclusive range `[min, max]`.
    pub fn alloc_int(&mut self, name: &str, min: i32, max: i32) -> Result<StateKey<i32>, StateError> {
        self.alloc(name, AxisDomain::Integer { min, max })
    }

    pub fn alloc_bool(&mut self, name: &str) -> Result<StateKey<bool>, StateError> {
        self.alloc(name, AxisDomain::Bool)
    }

    pub fn alloc_enum<T: StateEnum>(&mut self, name: &str) -> Result<StateKey<T>, StateError> {
        self.alloc(name, AxisDomain::Enum { names: T::NAMES })
    }

    pub fn finish(self) -> StateSchema {
        StateSchema {
            axes: self.axes,
            index: self.index,
        }
    }
}

/// Frozen axis layout of one block type.
#[derive(Clone, Debug, Default)]
pub struct StateSchema {
    axes: Vec<StateAxis>,
    index: HashMap<String, usize>,
}

impl StateSchema {
    #[inline]
    pub fn axes(&self) -> &[StateAxis] {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&StateAxis> {
        self.index.get(name).map(|&i| &self.axes[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Number of distinct instances this schema admits.
    pub fn state_count(&self) -> usize {
        self.axes
            .iter()
            .fold(1usize, |n, a| n.saturating_mul(a.domain.len()))
    }

    pub fn builder(&self) -> StateBuilder<'_> {
        StateBuilder {
            schema: self,
            values: vec![None; self.axes.len()],
        }
    }

    /// Builds an instance from textual `axis -> value` pairs (config files, CLI).
    pub fn instance_from_props(
        &self,
        props: &HashMap<String, String>,
    ) -> Result<StateInstance, StateError> {
        if let Some(unknown) = props.keys().find(|k| !self.index.contains_key(*k)) {
            return Err(StateError::UnknownAxis(unknown.clone()));
        }
        let mut builder = self.builder();
        for (i, axis) in self.axes.iter().enumerate() {
            let Some(text) = props.get(&axis.name) else {
                continue;
            };
            let raw = axis
                .domain
                .parse(text)
                .ok_or_else(|| StateError::InvalidValue {
                    axis: axis.name.clone(),
                    value: text.clone(),
                })?;
            builder = builder.set_index(i, raw)?;
        }
        builder.build()
    }

    /// Every valid instance, first axis varying slowest.
    pub fn all_states(&self) -> Vec<StateInstance> {
        let mut tuples: Vec<Vec<i32>> = vec![Vec::with_capacity(self.axes.len())];
        for axis in &self.axes {
            let mut next = Vec::with_capacity(tuples.len() * axis.domain.len());
            for prefix in &tuples {
                for raw in axis.domain.raw_range() {
                    let mut t = prefix.clone();
                    t.push(raw);
                    next.push(t);
                }
            }
            tuples = next;
        }
        tuples
            .into_iter()
            .map(|t| StateInstance { values: t.into() })
            .collect()
    }

    /// Checks that `state` has one in-domain value per axis of this schema.
    pub fn validate(&self, state: &StateInstance) -> Result<(), StateError> {
        let values = state.raw_values();
        if values.len() != self.axes.len() {
            return Err(StateError::WrongArity {
                expected: self.axes.len(),
                found: values.len(),
            });
        }
        for (axis, &raw) in self.axes.iter().zip(values) {
            if !axis.domain.contains(raw) {
                return Err(StateError::DomainViolation {
                    axis: axis.name.clone(),
                    value: raw,
                });
            }
        }
        Ok(())
    }

    pub fn value_name(&self, state: &StateInstance, axis: &str) -> Option<String> {
        let &i = self.index.get(axis)?;
        let raw = *state.values.get(i)?;
        Some(self.axes[i].domain.format(raw))
    }

    /// `axis=value` pairs joined by commas, in declaration order.
    pub fn describe(&self, state: &StateInstance) -> String {
        self.axes
            .iter()
            .zip(state.values.iter())
            .map(|(a, &raw)| format!("{}={}", a.name, a.domain.format(raw)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Collects one value per axis; `build` fails if any axis was left unset.
#[derive(Debug)]
pub struct StateBuilder<'a> {
    schema: &'a StateSchema,
    values: Vec<Option<i32>>,
}

impl StateBuilder<'_> {
    pub fn set<T: StateValue>(self, key: StateKey<T>, value: T) -> Result<Self, StateError> {
        self.set_index(key.index, value.to_raw())
    }

    fn set_index(mut self, index: usize, raw: i32) -> Result<Self, StateError> {
        let axis = self
            .schema
            .axes
            .get(index)
            .ok_or_else(|| StateError::UnknownAxis(format!("#{index}")))?;
        if !axis.domain.contains(raw) {
            return Err(StateError::DomainViolation {
                axis: axis.name.clone(),
                value: raw,
            });
        }
        self.values[index] = Some(raw);
        Ok(self)
    }

    pub fn build(self) -> Result<StateInstance, StateError> {
        let mut out = Vec::with_capacity(self.values.len());
        for (axis, value) in self.schema.axes.iter().zip(self.values) {
            match value {
                Some(raw) => out.push(raw),
                None => return Err(StateError::MissingAxis(axis.name.clone())),
            }
        }
        Ok(StateInstance { values: out.into() })
    }
}

/// A full, validated assignment of values to a schema's axes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateInstance {
    values: Arc<[i32]>,
}

impl StateInstance {
    /// Reads an axis value. `key` must come from the schema this instance was built against.
    #[inline]
    pub fn get<T: StateValue>(&self, key: StateKey<T>) -> T {
        T::from_raw(self.values[key.index])
    }

    #[inline]
    pub fn raw_values(&self) -> &[i32] {
        &self.values
    }
}
