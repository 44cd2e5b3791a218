//! DIMACS-like graph file I/O (component C8's input stage), ported from
//! `ad_graph.cc`'s `read`/`remove_junk`/`fprint`.
//!
//! The format is a loose superset of the DIMACS min-cost-flow convention:
//! comment lines (anything starting with `c`, `t`, or `n`) are skipped,
//! one `p <name> <n> <m>` problem line gives node and edge counts, and `m`
//! `a <u> <v> <w> <t>` arc lines follow with 1-based node ids.

use std::io::{BufRead, Write};

use crate::graph::{Graph, GraphBuilder};
use crate::{CycleRatioError, Result};

/// Parses a DIMACS-like graph from `reader`.
///
/// # Errors
/// Returns [`CycleRatioError::DimacsParse`] on any malformed line, a `p`
/// line missing or out of place, an arc referencing a node outside
/// `[1, n]`, or fewer arc lines than the problem line declared.
pub fn read_dimacs(reader: impl BufRead) -> Result<Graph> {
    let mut problem_seen = false;
    let mut builder: Option<GraphBuilder> = None;
    let mut expected_edges = 0usize;
    let mut edges_read = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let lineno = lineno + 1;
        let line = line.map_err(CycleRatioError::Io)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(tag) = fields.next() else { continue };

        match tag {
            "c" | "t" | "n" => continue,
            "p" => {
                if problem_seen {
                    return Err(parse_error(lineno, "duplicate problem line"));
                }
                let _name = fields.next().ok_or_else(|| parse_error(lineno, "missing problem name"))?;
                let n: usize = parse_field(fields.next(), lineno, "node count")?;
                let m: usize = parse_field(fields.next(), lineno, "edge count")?;
                if n == 0 {
                    return Err(parse_error(lineno, "node count must be positive"));
                }
                builder = Some(GraphBuilder::new(n));
                expected_edges = m;
                problem_seen = true;
            }
            "a" => {
                let b = builder
                    .as_mut()
                    .ok_or_else(|| parse_error(lineno, "arc line before problem line"))?;
                let u: usize = parse_field(fields.next(), lineno, "source node")?;
                let v: usize = parse_field(fields.next(), lineno, "target node")?;
                let w: i64 = parse_field(fields.next(), lineno, "weight")?;
                let t: i64 = parse_field(fields.next(), lineno, "transit time")?;
                if u == 0 || u > b.num_nodes() || v == 0 || v > b.num_nodes() {
                    return Err(parse_error(lineno, "node id out of range"));
                }
                b.insert_edge(u - 1, v - 1, w, t);
                edges_read += 1;
            }
            other => {
                return Err(parse_error(lineno, &format!("unrecognized line tag '{other}'")));
            }
        }
    }

    let builder = builder.ok_or_else(|| parse_error(0, "missing problem line"))?;
    if edges_read != expected_edges {
        return Err(parse_error(
            0,
            &format!("problem line declared {expected_edges} edges but {edges_read} were read"),
        ));
    }

    Ok(builder.build())
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, lineno: usize, what: &str) -> Result<T> {
    field
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| parse_error(lineno, &format!("invalid {what}")))
}

fn parse_error(lineno: usize, message: &str) -> CycleRatioError {
    CycleRatioError::DimacsParse {
        line: lineno,
        message: message.to_string(),
    }
}

/// Writes `g` in DIMACS-like format, labelling the problem line with
/// `name` and converting node ids back to 1-based.
///
/// # Errors
/// Propagates any I/O error from `writer`.
pub fn write_dimacs(g: &Graph, name: &str, mut writer: impl Write) -> Result<()> {
    writeln!(writer, "p {} {} {}", name, g.num_nodes(), g.num_edges()).map_err(CycleRatioError::Io)?;
    for e in g.edge_ids() {
        writeln!(
            writer,
            "a {} {} {} {}",
            g.src(e) + 1,
            g.tar(e) + 1,
            g.weight(e),
            g.transit(e)
        )
        .map_err(CycleRatioError::Io)?;
    }
    Ok(())
}
