//! Wavefront OBJ import.
//!
//! Supports the `v`, `vn`, `f` and `g` commands; every other line is
//! silently skipped. Faces with more than three vertices are fan
//! triangulated, and a face whose vertices carry normals becomes
//! [`SmoothTriangle`]s instead of flat [`Triangle`]s.

use crate::core::types::{Number, Point3, Vector3};
use crate::scene::graph::{SceneGraph, ShapeId};
use crate::shape::{SmoothTriangle, Triangle};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read OBJ file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("OBJ source contained no geometry")]
    Empty,
    #[error("invalid index {index} on line {line}")]
    InvalidIndex { index: i64, line: usize },
}

/// A single `i`, `i/j`, `i//k` or `i/j/k` face element.
///
/// Indices are kept as written: 1-based, with negatives counting back from
/// the end of the list and `0` meaning absent.
#[derive(Copy, Clone, Debug, Default)]
struct VertexIndex {
    v: i64,
    vn: i64,
}

/// The result of parsing an OBJ source.
///
/// Each OBJ group becomes a detached [group node](SceneGraph::insert_group)
/// holding its triangles; faces before any `g` command land in the unnamed
/// default group.
#[derive(Debug)]
pub struct ParsedObj {
    groups: Vec<(String, ShapeId)>,
    vertices: Vec<Point3>,
    normals: Vec<Vector3>,
}

impl ParsedObj {
    /// The group holding faces that preceded any `g` command
    pub fn default_group(&self) -> ShapeId { self.groups[0].1 }

    pub fn group(&self, name: &str) -> Option<ShapeId> {
        self.groups.iter().find(|(n, _)| n == name).map(|&(_, id)| id)
    }

    pub fn vertices(&self) -> &[Point3] { &self.vertices }

    pub fn normals(&self) -> &[Vector3] { &self.normals }

    /// Wraps every non-empty group under a single fresh group and returns it.
    pub fn into_group(self, graph: &mut SceneGraph) -> ShapeId {
        let top = graph.insert_group();
        for (_, group) in self.groups {
            if graph.child_count(group) > 0 {
                graph.add_child(top, group);
            }
        }
        top
    }
}

/// Parses OBJ source text, inserting the geometry into `graph` as detached
/// group nodes.
pub fn parse_str(source: &str, graph: &mut SceneGraph) -> Result<ParsedObj, ObjError> {
    let mut parsed = ParsedObj {
        groups: vec![(String::new(), graph.insert_group())],
        vertices: Vec::new(),
        normals: Vec::new(),
    };

    for (n_line, raw) in source.lines().enumerate() {
        let line = raw.trim_start_matches([' ', '\t']).trim_end_matches('\r');
        let n_line = n_line + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_ascii_whitespace();
        match tokens.next() {
            Some("v") => parsed.vertices.push(Point3::from(parse_coords(tokens))),
            Some("vn") => parsed.normals.push(Vector3::from(parse_coords(tokens))),
            Some("f") => add_face(&mut parsed, tokens, n_line, graph)?,
            Some("g") => {
                let name = tokens.collect::<Vec<_>>().join(" ");
                let group = graph.insert_group();
                parsed.groups.push((name, group));
            }
            Some(command) => trace!(target: "obj", line = n_line, command, "skipping unrecognised line"),
            None => unreachable!("line is non-empty"),
        }
    }

    if parsed.vertices.is_empty() {
        return Err(ObjError::Empty);
    }
    Ok(parsed)
}

pub fn parse_file(path: impl AsRef<Path>, graph: &mut SceneGraph) -> Result<ParsedObj, ObjError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ObjError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_str(&source, graph)
}

/// Reads up to three coordinates, defaulting missing or malformed ones to
/// zero.
fn parse_coords<'a>(tokens: impl Iterator<Item = &'a str>) -> [Number; 3] {
    let mut coords = [0.; 3];
    for (slot, token) in coords.iter_mut().zip(tokens) {
        *slot = token.parse().unwrap_or(0.);
    }
    coords
}

fn parse_triple(token: &str) -> VertexIndex {
    let mut parts = token.split('/');
    let parse = |part: Option<&str>| part.and_then(|p| p.parse().ok()).unwrap_or(0);

    let v = parse(parts.next());
    let _vt = parse(parts.next());
    let vn = parse(parts.next());
    VertexIndex { v, vn }
}

/// Resolves a 1-based (possibly negative) OBJ index into `list`.
fn resolve<T: Copy>(list: &[T], index: i64, line: usize) -> Result<T, ObjError> {
    let zero_based = if index > 0 {
        index - 1
    } else {
        list.len() as i64 + index
    };
    usize::try_from(zero_based)
        .ok()
        .and_then(|i| list.get(i).copied())
        .ok_or(ObjError::InvalidIndex { index, line })
}

fn add_face<'a>(
    parsed: &mut ParsedObj,
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
    graph: &mut SceneGraph,
) -> Result<(), ObjError> {
    let face: Vec<VertexIndex> = tokens.map(parse_triple).collect();
    let group = parsed.groups.last().expect("default group always exists").1;

    // Fan triangulation from the first vertex
    for i in 1..face.len().saturating_sub(1) {
        let (a, b, c) = (face[0], face[i], face[i + 1]);
        let p1 = resolve(&parsed.vertices, a.v, line)?;
        let p2 = resolve(&parsed.vertices, b.v, line)?;
        let p3 = resolve(&parsed.vertices, c.v, line)?;

        let triangle = if a.vn == 0 && b.vn == 0 && c.vn == 0 {
            graph.insert(Triangle::new(p1, p2, p3))
        } else {
            let n1 = resolve(&parsed.normals, a.vn, line)?;
            let n2 = resolve(&parsed.normals, b.vn, line)?;
            let n3 = resolve(&parsed.normals, c.vn, line)?;
            graph.insert(SmoothTriangle::new(p1, p2, p3, n1, n2, n3))
        };
        graph.add_child(group, triangle);
    }

    Ok(())
}
