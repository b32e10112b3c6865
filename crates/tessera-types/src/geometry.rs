//! Planar geometry payload with a minimal well-known-text reader
//!
//! Supported shapes: POINT, LINESTRING, POLYGON, MULTIPOINT and
//! MULTILINESTRING, each optionally `EMPTY`, with 2 or 3 ordinates and an
//! optional `SRID=n;` prefix (EWKT).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{TypeTag, ValueError, ValueResult};

/// A single position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    fn position_cmp(&self, other: &Self) -> Ordering {
        ordinate_cmp(self.x, other.x)
            .then_with(|| ordinate_cmp(self.y, other.y))
            .then_with(|| match (self.z, other.z) {
                (Some(a), Some(b)) => ordinate_cmp(a, b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
    }
}

/// Numeric order with `-0 == 0`; NaN falls back to `total_cmp`
fn ordinate_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Shape of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
}

impl GeometryKind {
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "POINT" => Some(Self::Point),
            "LINESTRING" => Some(Self::LineString),
            "POLYGON" => Some(Self::Polygon),
            "MULTIPOINT" => Some(Self::MultiPoint),
            "MULTILINESTRING" => Some(Self::MultiLineString),
            _ => None,
        }
    }

    /// Whether the WKT body nests one level of parentheses per part
    const fn nested(&self) -> bool {
        matches!(self, Self::Polygon | Self::MultiLineString)
    }
}

/// A geometry value
///
/// `parts` holds one coordinate list per ring or line; a point or a line
/// string has a single part, a multipoint one part per point. The SRID is
/// metadata and does not take part in equality or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub kind: GeometryKind,
    pub srid: Option<i32>,
    pub parts: Vec<Vec<Coordinate>>,
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            kind: GeometryKind::Point,
            srid: None,
            parts: vec![vec![Coordinate::new(x, y)]],
        }
    }

    pub fn line_string(coordinates: Vec<Coordinate>) -> Self {
        Self {
            kind: GeometryKind::LineString,
            srid: None,
            parts: vec![coordinates],
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(Vec::is_empty)
    }

    /// Parse well-known text
    pub fn parse_wkt(s: &str) -> ValueResult<Self> {
        WktReader::new(s).read()
    }

    /// Render as well-known text (with an `SRID=n;` prefix when set)
    pub fn to_wkt(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Geometry {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_wkt(s)
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Geometry {}

impl PartialOrd for Geometry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Geometry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind).then_with(|| {
            let mut left = self.parts.iter();
            let mut right = other.parts.iter();
            loop {
                match (left.next(), right.next()) {
                    (Some(a), Some(b)) => {
                        let ordering = compare_coordinates(a, b);
                        if ordering != Ordering::Equal {
                            return ordering;
                        }
                    }
                    (None, None) => return Ordering::Equal,
                    (None, Some(_)) => return Ordering::Less,
                    (Some(_), None) => return Ordering::Greater,
                }
            }
        })
    }
}

fn compare_coordinates(a: &[Coordinate], b: &[Coordinate]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.position_cmp(y))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

fn write_coordinate(f: &mut fmt::Formatter<'_>, c: &Coordinate) -> fmt::Result {
    write!(f, "{} {}", c.x, c.y)?;
    if let Some(z) = c.z {
        write!(f, " {z}")?;
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, coordinates: &[Coordinate]) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in coordinates.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_coordinate(f, c)?;
    }
    f.write_str(")")
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(srid) = self.srid {
            write!(f, "SRID={srid};")?;
        }
        f.write_str(self.kind.keyword())?;
        if self.is_empty() {
            return f.write_str(" EMPTY");
        }
        f.write_str(" ")?;
        match self.kind {
            GeometryKind::Point | GeometryKind::LineString => {
                write_list(f, self.parts.first().map(Vec::as_slice).unwrap_or_default())
            }
            GeometryKind::MultiPoint | GeometryKind::Polygon | GeometryKind::MultiLineString => {
                f.write_str("(")?;
                for (i, part) in self.parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_list(f, part)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Cursor over WKT input
struct WktReader<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> WktReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            rest: input.trim(),
        }
    }

    fn error(&self, reason: impl ToString) -> ValueError {
        ValueError::parse(TypeTag::Geometry, self.input, reason)
    }

    fn read(mut self) -> ValueResult<Geometry> {
        let srid = self.read_srid()?;
        let keyword = self.read_word();
        let kind = GeometryKind::from_keyword(keyword)
            .ok_or_else(|| self.error(format!("unsupported geometry type '{keyword}'")))?;

        self.skip_whitespace();
        // Optional Z/M dimension marker
        if let Some(rest) = self
            .rest
            .strip_prefix('Z')
            .or_else(|| self.rest.strip_prefix('z'))
        {
            if rest.trim_start().starts_with('(') {
                self.rest = rest;
            }
        }

        let parts = if self.read_word().eq_ignore_ascii_case("EMPTY") {
            Vec::new()
        } else {
            self.read_body(kind)?
        };

        self.skip_whitespace();
        if !self.rest.is_empty() {
            return Err(self.error(format!("unexpected trailing input '{}'", self.rest)));
        }
        if kind == GeometryKind::Point && parts.first().is_some_and(|p| p.len() != 1) {
            return Err(self.error("a point has exactly one coordinate"));
        }

        Ok(Geometry { kind, srid, parts })
    }

    fn read_srid(&mut self) -> ValueResult<Option<i32>> {
        let Some(prefix) = self.rest.get(..5) else {
            return Ok(None);
        };
        if !prefix.eq_ignore_ascii_case("SRID=") {
            return Ok(None);
        }
        let input = self.rest;
        let (number, rest) = input[5..]
            .split_once(';')
            .ok_or_else(|| self.error("SRID prefix must end with ';'"))?;
        let srid = number
            .trim()
            .parse()
            .map_err(|_| self.error(format!("invalid SRID '{number}'")))?;
        self.rest = rest;
        Ok(Some(srid))
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn read_word(&mut self) -> &'a str {
        self.skip_whitespace();
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        word
    }

    fn expect(&mut self, c: char) -> ValueResult<()> {
        self.skip_whitespace();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.error(format!("expected '{c}'"))),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn read_body(&mut self, kind: GeometryKind) -> ValueResult<Vec<Vec<Coordinate>>> {
        self.expect('(')?;
        let parts = if kind.nested() {
            let mut parts = vec![self.read_list()?];
            while self.eat(',') {
                parts.push(self.read_list()?);
            }
            parts
        } else if kind == GeometryKind::MultiPoint {
            // Both MULTIPOINT ((1 2), (3 4)) and MULTIPOINT (1 2, 3 4)
            let mut parts = Vec::new();
            loop {
                if self.eat('(') {
                    parts.push(vec![self.read_coordinate()?]);
                    self.expect(')')?;
                } else {
                    parts.push(vec![self.read_coordinate()?]);
                }
                if !self.eat(',') {
                    break;
                }
            }
            parts
        } else {
            vec![self.read_coordinates()?]
        };
        self.expect(')')?;
        Ok(parts)
    }

    fn read_list(&mut self) -> ValueResult<Vec<Coordinate>> {
        self.expect('(')?;
        let coordinates = self.read_coordinates()?;
        self.expect(')')?;
        Ok(coordinates)
    }

    fn read_coordinates(&mut self) -> ValueResult<Vec<Coordinate>> {
        let mut coordinates = vec![self.read_coordinate()?];
        while self.eat(',') {
            coordinates.push(self.read_coordinate()?);
        }
        Ok(coordinates)
    }

    fn read_coordinate(&mut self) -> ValueResult<Coordinate> {
        let x = self.read_number()?;
        let y = self.read_number()?;
        self.skip_whitespace();
        let z = if self
            .rest
            .starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            Some(self.read_number()?)
        } else {
            None
        };
        Ok(Coordinate { x, y, z })
    }

    fn read_number(&mut self) -> ValueResult<f64> {
        self.skip_whitespace();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
            .unwrap_or(self.rest.len());
        let (number, rest) = self.rest.split_at(end);
        let value = number
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid ordinate '{number}'")))?;
        self.rest = rest;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round_trip() {
        let point = Geometry::parse_wkt("POINT (30 10)").unwrap();
        assert_eq!(point, Geometry::point(30.0, 10.0));
        assert_eq!(point.to_wkt(), "POINT (30 10)");
    }

    #[test]
    fn test_srid_prefix_and_empty() {
        let g = Geometry::parse_wkt("SRID=4326;LINESTRING EMPTY").unwrap();
        assert_eq!(g.srid, Some(4326));
        assert!(g.is_empty());
        assert_eq!(g.to_wkt(), "SRID=4326;LINESTRING EMPTY");
    }

    #[test]
    fn test_polygon_and_multipoint() {
        let polygon =
            Geometry::parse_wkt("POLYGON ((30 10, 40 40, 20 40, 10 20, 30 10))").unwrap();
        assert_eq!(polygon.parts.len(), 1);
        assert_eq!(polygon.parts[0].len(), 5);

        let a = Geometry::parse_wkt("MULTIPOINT ((10 40), (40 30))").unwrap();
        let b = Geometry::parse_wkt("MULTIPOINT (10 40, 40 30)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_by_kind_then_coordinates() {
        let p1 = Geometry::point(1.0, 2.0);
        let p2 = Geometry::point(1.0, 3.0);
        let line = Geometry::parse_wkt("LINESTRING (0 0, 1 1)").unwrap();
        assert!(p1 < p2);
        assert!(p2 < line);
        assert_eq!(p1.clone().with_srid(4326), p1);
    }

    #[test]
    fn test_signed_zero_ordinates_are_equal() {
        let a = Geometry::parse_wkt("POINT (0 0)").unwrap();
        let b = Geometry::parse_wkt("POINT (-0 0)").unwrap();
        assert_eq!(a, b);
        assert_eq!(Geometry::point(-0.0, 1.0).cmp(&Geometry::point(0.0, 1.0)), Ordering::Equal);
        assert!(Geometry::point(f64::NAN, 0.0) > Geometry::point(f64::INFINITY, 0.0));
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert!(Geometry::parse_wkt("CIRCLE (1 2)").is_err());
        assert!(Geometry::parse_wkt("POINT (1)").is_err());
        assert!(Geometry::parse_wkt("POINT (1 2").is_err());
        assert!(Geometry::parse_wkt("POINT (1 2, 3 4)").is_err());
    }
}
