//! Target-to-IR conversion.
//!
//! Every discovered source gets exactly one compile edge. Each target then
//! gets a link edge over its own objects followed, for secondary targets, by
//! the reused target's objects with the entry-point object removed.

use camino::Utf8PathBuf;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::object_path::ObjectMapper;

use super::graph::{BuildGraph, CompileEdge, DiscoveredTarget, IrGenError, LinkEdge, TargetKind};

/// An object owned by a target, remembering whether it holds the entry point.
#[derive(Debug, Clone)]
struct OwnedObject {
    path: Utf8PathBuf,
    is_entry_point: bool,
}

impl BuildGraph {
    /// Assemble the graph for `targets`, in order.
    ///
    /// `entry_point` is the file stem of the source defining the program
    /// entry symbol; its object is never passed on to a secondary target.
    ///
    /// # Errors
    ///
    /// Returns [`IrGenError`] when two sources collide on one object, a
    /// source lies outside the root, target names repeat or shadow an
    /// object, a secondary target reuses an undeclared target, or no primary
    /// target exists.
    pub fn assemble(
        targets: &[DiscoveredTarget],
        mapper: &ObjectMapper,
        entry_point: &str,
    ) -> Result<Self, IrGenError> {
        let mut producers: IndexMap<Utf8PathBuf, CompileEdge> = IndexMap::new();
        let mut owned: IndexMap<Utf8PathBuf, Vec<OwnedObject>> = IndexMap::new();
        let mut link_edges = Vec::with_capacity(targets.len());

        for target in targets {
            let name = &target.spec.name;
            if owned.contains_key(name) {
                return Err(IrGenError::DuplicateTarget {
                    target: name.clone(),
                });
            }

            let objects = Self::process_sources(target, mapper, entry_point, &mut producers)?;
            let mut inputs: IndexSet<Utf8PathBuf> =
                objects.iter().map(|obj| obj.path.clone()).collect();
            if let TargetKind::Secondary { reuses } = &target.spec.kind {
                let reused = owned.get(reuses).ok_or_else(|| IrGenError::UnknownTarget {
                    target: name.clone(),
                    reused: reuses.clone(),
                })?;
                inputs.extend(
                    reused
                        .iter()
                        .filter(|obj| !obj.is_entry_point)
                        .map(|obj| obj.path.clone()),
                );
            }

            debug!(target = %name, inputs = inputs.len(), "registered link edge");
            link_edges.push(LinkEdge {
                output: name.clone(),
                inputs: inputs.into_iter().collect(),
            });
            owned.insert(name.clone(), objects);
        }

        if let Some(edge) = link_edges
            .iter()
            .find(|edge| producers.contains_key(&edge.output))
        {
            return Err(IrGenError::TargetShadowsObject {
                target: edge.output.clone(),
            });
        }

        let default_target = targets
            .iter()
            .find(|target| target.spec.kind == TargetKind::Primary)
            .map(|target| target.spec.name.clone())
            .ok_or(IrGenError::NoPrimaryTarget)?;

        Ok(Self {
            compile_edges: producers.into_values().collect(),
            link_edges,
            default_target,
        })
    }

    /// Map a target's sources and register their compile edges.
    fn process_sources(
        target: &DiscoveredTarget,
        mapper: &ObjectMapper,
        entry_point: &str,
        producers: &mut IndexMap<Utf8PathBuf, CompileEdge>,
    ) -> Result<Vec<OwnedObject>, IrGenError> {
        let mut objects = Vec::with_capacity(target.sources.len());
        for source in &target.sources {
            let mapped = mapper.map(source)?;
            if let Some(existing) = producers.get(&mapped.object) {
                if existing.source != mapped.source {
                    return Err(IrGenError::DuplicateOutput {
                        object: mapped.object,
                        first: existing.source.clone(),
                        second: mapped.source,
                    });
                }
            } else {
                producers.insert(
                    mapped.object.clone(),
                    CompileEdge {
                        source: mapped.source,
                        object: mapped.object.clone(),
                    },
                );
            }
            objects.push(OwnedObject {
                path: mapped.object,
                is_entry_point: source.stem() == Some(entry_point),
            });
        }
        Ok(objects)
    }
}
