/// Parser for the comma-separated polyhedron text format
///
/// ```text
/// <vertex_count>,<face_count>
/// <id>,<x>,<y>,<z>            (vertex_count lines, 1-based ids)
/// <v1>,<v2>,...,<vk>          (face_count lines, 1-based ids, k >= 3)
/// ```
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    character::complete::{char, i64 as int, space0, u64 as count},
    combinator::{all_consuming, map},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};
use tracing::{debug, warn};

use crate::error::{LoadError, ParseError, ParseErrorKind};
use crate::geometry::{check_face, Face, Polyhedron};

/// Read and parse a polyhedron description from `path`
pub fn load_polyhedron(path: impl AsRef<Path>) -> Result<Polyhedron, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mesh = parse_polyhedron(&text)?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded polyhedron"
    );
    Ok(mesh)
}

/// Parse a polyhedron description. Lines past the declared records are ignored.
pub fn parse_polyhedron(input: &str) -> Result<Polyhedron, ParseError> {
    let lines: Vec<&str> = input.lines().collect();

    let header = lines
        .first()
        .ok_or_else(|| ParseError::new(1, ParseErrorKind::MalformedHeader))?;
    let (vertex_count, face_count) = run(header_record, header)
        .and_then(|(v, f)| Some((usize::try_from(v).ok()?, usize::try_from(f).ok()?)))
        .ok_or_else(|| ParseError::new(1, ParseErrorKind::MalformedHeader))?;

    // Check the record count before sizing any buffer from the header
    let records = &lines[1..];
    let expected = vertex_count.saturating_add(face_count);
    if records.len() < expected {
        return Err(ParseError::new(
            records.len() + 2,
            ParseErrorKind::MissingLines {
                expected,
                found: records.len(),
            },
        ));
    }
    let (vertex_lines, face_lines) = records[..expected].split_at(vertex_count);

    let mut vertices = vec![Point3::origin(); vertex_count];
    let mut assigned = vec![false; vertex_count];
    for (line_no, line) in numbered(vertex_lines, 2) {
        let (id, position) = run(vertex_record, line)
            .ok_or_else(|| ParseError::new(line_no, ParseErrorKind::MalformedRecord))?;
        let slot = slot_for(id, vertex_count).map_err(|kind| ParseError::new(line_no, kind))?;
        vertices[slot] = position;
        assigned[slot] = true;
    }

    let mut faces = Vec::with_capacity(face_count);
    for (line_no, line) in numbered(face_lines, 2 + vertex_count) {
        let ids = run(face_record, line)
            .ok_or_else(|| ParseError::new(line_no, ParseErrorKind::MalformedRecord))?;
        let indices = ids
            .into_iter()
            .map(|id| slot_for(id, vertex_count))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| ParseError::new(line_no, kind))?;
        let face = Face::from(indices);
        check_face(&face, vertex_count).map_err(|kind| ParseError::new(line_no, kind))?;
        faces.push(face);
    }

    for slot in (0..vertex_count).filter(|&slot| !assigned[slot]) {
        warn!(vertex = slot + 1, "vertex id never defined, placing it at the origin");
    }

    Polyhedron::new(vertices, faces)
}

/// Pair lines with their 1-based line numbers, starting at `first`
fn numbered<'a>(lines: &'a [&'a str], first: usize) -> impl Iterator<Item = (usize, &'a str)> {
    lines.iter().enumerate().map(move |(i, &line)| (first + i, line))
}

/// Map a 1-based vertex id to its 0-based slot
fn slot_for(id: i64, vertex_count: usize) -> Result<usize, ParseErrorKind> {
    match usize::try_from(id) {
        Ok(id) if (1..=vertex_count).contains(&id) => Ok(id - 1),
        _ => Err(ParseErrorKind::VertexOutOfRange { id, vertex_count }),
    }
}

/// Run a record parser over a whole line
fn run<'a, T>(parser: fn(&'a str) -> IResult<&'a str, T>, line: &'a str) -> Option<T> {
    all_consuming(parser)(line.trim_end_matches('\r')).ok().map(|(_, value)| value)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn header_record(input: &str) -> IResult<&str, (u64, u64)> {
    delimited(space0, separated_pair(count, comma, count), space0)(input)
}

fn vertex_record(input: &str) -> IResult<&str, (i64, Point3<f64>)> {
    let coords = map(
        tuple((double, comma, double, comma, double)),
        |(x, _, y, _, z)| Point3::new(x, y, z),
    );
    delimited(space0, separated_pair(int, comma, coords), space0)(input)
}

fn face_record(input: &str) -> IResult<&str, Vec<i64>> {
    delimited(space0, separated_list1(comma, int), space0)(input)
}
