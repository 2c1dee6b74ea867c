//! Indexing and slicing of lists and strings.

use crate::{Value, ValueError, ValueResult};

/// An evaluated `[i]` or `[start:stop:step]` subscript.
///
/// Each component is expected to be an Integer; `Value::None` marks an
/// omitted component.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceIndex {
    pub start: Value,
    pub stop: Value,
    pub step: Value,
    /// `false` for a single index, in which case only `start` is used.
    pub is_slice: bool,
}

/// Concrete bounds of a slice against a sequence of known length.
///
/// `stop` is exclusive and may be `-1` when walking backwards to the
/// first element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl SliceIndex {
    pub fn index(index: Value) -> Self {
        SliceIndex {
            start: index,
            stop: Value::None,
            step: Value::None,
            is_slice: false,
        }
    }

    pub fn slice(start: Value, stop: Value, step: Value) -> Self {
        SliceIndex {
            start,
            stop,
            step,
            is_slice: true,
        }
    }

    /// Normalize against a sequence of `len` elements.
    ///
    /// Negative components count from the end; out-of-range bounds are
    /// clamped. A zero step is a range error.
    pub fn resolve(&self, len: usize) -> Result<ResolvedSlice, ValueError> {
        let len = i64::try_from(len).map_err(|_| ValueError::range("Sequence is too large to slice."))?;
        let step = optional_integer(&self.step, "step")?.unwrap_or(1);
        if step == 0 {
            return Err(ValueError::range("Slice step cannot be zero."));
        }
        let start = optional_integer(&self.start, "start")?;
        let stop = optional_integer(&self.stop, "stop")?;

        let wrap = |i: i64| if i < 0 { i + len } else { i };
        let resolved = if step > 0 {
            ResolvedSlice {
                start: start.map_or(0, |i| wrap(i).clamp(0, len)),
                stop: stop.map_or(len, |i| wrap(i).clamp(0, len)),
                step,
            }
        } else {
            ResolvedSlice {
                start: start.map_or(len - 1, |i| wrap(i).clamp(-1, len - 1)),
                stop: stop.map_or(-1, |i| wrap(i).clamp(-1, len - 1)),
                step,
            }
        };
        Ok(resolved)
    }
}

fn optional_integer(value: &Value, component: &str) -> Result<Option<i64>, ValueError> {
    match value {
        Value::None => Ok(None),
        Value::Integer(n) => Ok(Some(*n)),
        other => Err(ValueError::index(format!(
            "Slice {component} must be an integer, found `{}`.",
            other.type_tag()
        ))),
    }
}

impl ResolvedSlice {
    /// Positions selected by the slice, in visiting order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        let ResolvedSlice { start, stop, step } = self;
        let mut current = start;
        std::iter::from_fn(move || {
            let in_range = if step > 0 { current < stop } else { current > stop };
            if !in_range {
                return None;
            }
            let at = usize::try_from(current).ok()?;
            current = current.saturating_add(step);
            Some(at)
        })
    }
}

/// Position of `index` in a sequence of `len` elements.
fn element_position(index: &Value, len: usize) -> Result<usize, ValueError> {
    let Value::Integer(raw) = index else {
        return Err(ValueError::index(format!(
            "Index must be an integer, found `{}`.",
            index.type_tag()
        )));
    };
    let wrapped = if *raw < 0 {
        i64::try_from(len).ok().map(|l| raw + l)
    } else {
        Some(*raw)
    };
    wrapped
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < len)
        .ok_or_else(|| ValueError::index(format!("Index `{raw}` is out of bounds.")))
}

impl Value {
    /// `value[index]` for lists, strings and hashmaps.
    pub fn index(&self, index: &Value) -> ValueResult {
        match self {
            Value::List(items) => {
                let items = items.borrow();
                let at = element_position(index, items.len())?;
                Ok(items[at].clone())
            }
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                let at = element_position(index, chars.len())?;
                Ok(Value::String(chars[at].to_string()))
            }
            Value::Hashmap(map) => map
                .borrow()
                .get(index)
                .cloned()
                .ok_or_else(|| ValueError::index(format!("Key `{}` was not found.", index.serialize()))),
            other => Err(ValueError::new(
                crate::ValueErrorKind::Type,
                format!("Type `{}` cannot be indexed.", other.type_tag()),
            )),
        }
    }

    /// `value[start:stop:step]`, or a plain index when `slice` is not a
    /// range.
    pub fn slice(&self, slice: &SliceIndex) -> ValueResult {
        if !slice.is_slice {
            return self.index(&slice.start);
        }
        match self {
            Value::List(items) => {
                let items = items.borrow();
                let bounds = slice.resolve(items.len())?;
                Ok(Value::list(bounds.indices().map(|i| items[i].clone()).collect()))
            }
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                let bounds = slice.resolve(chars.len())?;
                Ok(Value::String(bounds.indices().map(|i| chars[i]).collect()))
            }
            other => Err(ValueError::new(
                crate::ValueErrorKind::Type,
                format!("Type `{}` cannot be sliced.", other.type_tag()),
            )),
        }
    }

    /// `value[index] = item` for lists and hashmaps.
    pub fn set_index(&self, index: &Value, item: Value) -> Result<(), ValueError> {
        match self {
            Value::List(items) => {
                let mut items = items.borrow_mut();
                let at = element_position(index, items.len())?;
                items[at] = item;
                Ok(())
            }
            Value::Hashmap(map) => {
                map.borrow_mut().insert(index.clone(), item);
                Ok(())
            }
            other => Err(ValueError::new(
                crate::ValueErrorKind::Type,
                format!("Type `{}` does not support index assignment.", other.type_tag()),
            )),
        }
    }
}
