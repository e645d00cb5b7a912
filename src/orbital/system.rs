//! The body tree as a whole: ids, lookup and world positions

use bevy::prelude::*;
use rand::Rng;

use crate::config::{BodyConfig, ConfigError};
use crate::orbital::body::{BodyKind, OrbitalBody};

/// Stable handle of a body, assigned in depth-first order (the star is 0).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Component)]
pub struct BodyId(pub usize);

/// Snapshot of what the camera rig needs to frame a body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackTarget {
    pub kind: BodyKind,
    /// World position on the orbital plane, as (x, z)
    pub position: Vec2,
    pub radius: f32,
}

/// The simulated system: owns the root body and indexes every descendant.
#[derive(Resource, Debug)]
pub struct SolarSystem {
    root: OrbitalBody,
    // Child-index path from the root for each BodyId
    paths: Vec<Vec<usize>>,
}

impl SolarSystem {
    /// Validate the table and build the tree, drawing each body's initial
    /// orbit angle uniformly from [0, 360).
    pub fn from_config(config: &BodyConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let root = OrbitalBody::from_config(config, 0, &mut || rng.random_range(0.0..360.0));
        let mut paths = Vec::new();
        collect_paths(&root, &mut Vec::new(), &mut paths);
        Ok(Self { root, paths })
    }

    pub fn advance(&mut self, time_scale: f64) {
        self.root.advance(time_scale);
    }

    pub fn body(&self, id: BodyId) -> Option<&OrbitalBody> {
        let path = self.paths.get(id.0)?;
        let mut body = &self.root;
        for &index in path {
            body = body.satellites().get(index)?;
        }
        Some(body)
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies()
            .find(|entry| entry.body.name().eq_ignore_ascii_case(name))
            .map(|entry| entry.id)
    }

    /// Sum of planar positions along the ancestor chain, as (x, z).
    pub fn world_position(&self, id: BodyId) -> Option<Vec2> {
        self.position_along(self.paths.get(id.0)?)
    }

    /// World position of the parent of `id`; `None` for the root.
    pub fn parent_position(&self, id: BodyId) -> Option<Vec2> {
        let (_, ancestors) = self.paths.get(id.0)?.split_last()?;
        self.position_along(ancestors)
    }

    fn position_along(&self, path: &[usize]) -> Option<Vec2> {
        let mut body = &self.root;
        let mut position = body.current_planar_position();
        for &index in path {
            body = body.satellites().get(index)?;
            position += body.current_planar_position();
        }
        Some(position)
    }

    pub fn track_target(&self, id: BodyId) -> Option<TrackTarget> {
        let body = self.body(id)?;
        Some(TrackTarget {
            kind: body.kind(),
            position: self.world_position(id)?,
            radius: body.radius(),
        })
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }

    /// Depth-first walk of every body with its id and world position.
    pub fn bodies(&self) -> impl Iterator<Item = BodyEntry<'_>> + '_ {
        let mut stack = vec![(&self.root, Vec2::ZERO)];
        let mut next_id = 0;
        std::iter::from_fn(move || {
            let (body, parent_position) = stack.pop()?;
            let position = parent_position + body.current_planar_position();
            for satellite in body.satellites().iter().rev() {
                stack.push((satellite, position));
            }
            let entry = BodyEntry {
                id: BodyId(next_id),
                body,
                position,
            };
            next_id += 1;
            Some(entry)
        })
    }
}

/// One item of [`SolarSystem::bodies`].
#[derive(Copy, Clone, Debug)]
pub struct BodyEntry<'a> {
    pub id: BodyId,
    pub body: &'a OrbitalBody,
    /// World position on the orbital plane, as (x, z)
    pub position: Vec2,
}

fn collect_paths(body: &OrbitalBody, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    out.push(path.clone());
    for (index, satellite) in body.satellites().iter().enumerate() {
        path.push(index);
        collect_paths(satellite, path, out);
        path.pop();
    }
}
