use serde::Serialize;

use crate::{define_index_newtype, problem::location::NodeIdx};

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    start: NodeIdx,
    end: NodeIdx,
    capacity: Option<usize>,
}

impl Vehicle {
    pub fn start(&self) -> NodeIdx {
        self.start
    }

    pub fn end(&self) -> NodeIdx {
        self.end
    }

    /// Maximum number of stops the vehicle may serve, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub(crate) fn set_end(&mut self, end: NodeIdx) {
        self.end = end;
    }

    pub(crate) fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    start: Option<NodeIdx>,
    end: Option<NodeIdx>,
    capacity: Option<usize>,
}

impl VehicleBuilder {
    pub fn set_start(&mut self, start: NodeIdx) -> &mut VehicleBuilder {
        self.start = Some(start);
        self
    }

    pub fn set_end(&mut self, end: NodeIdx) -> &mut VehicleBuilder {
        self.end = Some(end);
        self
    }

    pub fn set_capacity(&mut self, capacity: usize) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    /// Missing start and end default to the depot, node 0.
    pub fn build(self) -> Vehicle {
        let start = self.start.unwrap_or_default();

        Vehicle {
            start,
            end: self.end.unwrap_or(start),
            capacity: self.capacity,
        }
    }
}
