use itertools::Itertools;
use log::trace;
use multimap::MultiMap;
use nom::branch::alt;
use nom::bytes::complete::{escaped, is_not, tag};
use nom::character::complete::{anychar, char, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, rest, value};
use nom::multi::{fold_many0, many1, separated_list0};
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated};
use nom::IResult;

use crate::error::{Error, Result};
use crate::record::{PositionRecord, SampleRecord};
use crate::types::{Number, MISSING_VALUE};

pub(crate) const HEADER_MARKER: &str = "##";

/// Number of fixed columns up to and including INFO.
const MIN_COLUMNS: usize = 8;

fn key_value(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(is_not("="), tag("="), rest)(input)
}

/// Split a `KEY=VALUE` token on its first `=`; later `=` characters belong to the value.
///
/// ```
/// use vcf_model::parser::split_property;
///
/// assert_eq!(split_property("URL=http://x.org/?a=b").unwrap(), ("URL", "http://x.org/?a=b"));
/// assert!(split_property("no_separator").is_err());
/// ```
pub fn split_property(token: &str) -> Result<(&str, &str)> {
    all_consuming(key_value)(token)
        .map(|(_, pair)| pair)
        .map_err(|_| Error::MalformedProperty(token.to_owned()))
}

fn quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        opt(escaped(is_not("\\\""), '\\', anychar)),
        char('"'),
    ))(input)
}

fn segment(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((quoted, is_not(",\"")))))(input)
}

fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(separated_list0(char(','), segment), opt(char(',')))(input)
}

/// Split the inner part of a `KEY=<...>` block on commas that are not inside quotes.
/// A single trailing comma is tolerated.
pub fn split_metadata_body(inner: &str) -> Result<Vec<&str>> {
    all_consuming(segments)(inner)
        .map(|(_, parts)| parts)
        .map_err(|_| Error::MalformedProperty(inner.to_owned()))
}

/// Remove surrounding double quotes and resolve `\"` and `\\` escapes.
/// Any other backslash is kept as written.
///
/// Returns `None` if `text` is not a well-formed quoted string.
pub(crate) fn unquote(text: &str) -> Option<String> {
    fn fragment(input: &str) -> IResult<&str, &str> {
        alt((
            is_not("\\\""),
            preceded(char('\\'), alt((tag("\\"), tag("\"")))),
            recognize(pair(char('\\'), anychar)),
        ))(input)
    }
    fn inner(input: &str) -> IResult<&str, String> {
        fold_many0(fragment, String::new, |mut unquoted, part| {
            unquoted.push_str(part);
            unquoted
        })(input)
    }
    all_consuming(delimited(char('"'), inner, char('"')))(text)
        .ok()
        .map(|(_, unquoted)| unquoted)
}

fn header_line(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    preceded(
        tag(HEADER_MARKER),
        alt((
            map(key_value, |(key, value)| (key, Some(value))),
            map(rest, |line| (line, None)),
        )),
    )(input)
}

/// Split a `##KEY=VALUE` header line into its record type name and body.
///
/// Lines without a `=` yield the whole text (minus the marker) and no body.
pub fn parse_header_line(line: &str) -> Result<(&str, Option<&str>)> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    all_consuming(header_line)(line)
        .map(|(_, parts)| parts)
        .map_err(|_| Error::MalformedLine(line.to_owned()))
}

/// Parse the `Number=` field of an INFO or FORMAT definition.
pub fn number(input: &str) -> Result<Number> {
    fn parse(input: &str) -> IResult<&str, Number> {
        alt((
            map(map_res(digit1, |n: &str| n.parse::<usize>()), Number::Count),
            value(Number::AlternateAlleles, tag("A")),
            value(Number::Alleles, tag("R")),
            value(Number::Genotypes, tag("G")),
            value(Number::Unknown, tag(MISSING_VALUE)),
        ))(input)
    }
    all_consuming(parse)(input)
        .map(|(_, number)| number)
        .map_err(|_| Error::MalformedProperty(format!("Number={}", input)))
}

fn list_column(column: &str, separator: char) -> Vec<String> {
    if column.is_empty() || column == MISSING_VALUE {
        Vec::new()
    } else {
        column.split(separator).map(str::to_owned).collect()
    }
}

/// Parse an INFO column: `;` separated entries of `KEY=v1,v2` or a bare flag `KEY`.
///
/// Flags are stored with a single empty sub-value so that they are present but carry no payload.
pub fn info_column(column: &str) -> Result<MultiMap<String, String>> {
    let mut info = MultiMap::new();
    if column.is_empty() || column == MISSING_VALUE {
        return Ok(info);
    }
    for entry in column.split(';').filter(|e| !e.is_empty()) {
        if entry.contains('=') {
            let (key, raw) = split_property(entry)?;
            for part in raw.split(',') {
                info.insert(key.to_owned(), part.to_owned());
            }
        } else {
            info.insert(entry.to_owned(), String::new());
        }
    }
    Ok(info)
}

/// Split a tab-delimited data line into its position record and one sample record per sample column.
pub fn parse_data_line(line: &str) -> Result<(PositionRecord, Vec<SampleRecord>)> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    let columns = line.split('\t').collect_vec();
    if columns.len() < MIN_COLUMNS {
        return Err(Error::MalformedLine(format!(
            "expected at least {} columns, got {}",
            MIN_COLUMNS,
            columns.len()
        )));
    }
    trace!("splitting data line with {} columns", columns.len());

    let position = columns[1]
        .parse::<u64>()
        .map_err(|_| Error::MalformedLine(format!("[POS] not a number: '{}'", columns[1])))?;
    let format = columns.get(8).map_or_else(Vec::new, |c| list_column(c, ':'));
    let record = PositionRecord::new(
        columns[0].to_owned(),
        position,
        list_column(columns[2], ';'),
        list_column(columns[3], ','),
        list_column(columns[4], ','),
        columns[5].to_owned(),
        columns[6].to_owned(),
        info_column(columns[7])?,
        format,
    )?;

    let samples = columns
        .iter()
        .skip(9)
        .map(|column| {
            let values = column.split(':').map(str::to_owned).collect_vec();
            // trailing sample fields may be dropped
            let keys = record
                .format()
                .iter()
                .take(values.len())
                .cloned()
                .collect_vec();
            SampleRecord::new(keys, values)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((record, samples))
}
