//! PEG grammar for single PLY header lines.
//!
//! The grammar is structural only: it recognizes the line shapes and captures
//! raw tokens where a bad token must be reported precisely (encodings, scalar
//! types). Mapping those tokens onto the typed model, and deciding which
//! lines are legal where, is the header reader's job.

use crate::ply::ScalarType;

/// A scalar type token as spelled in the header: the resolved tag, or the raw
/// token when it names no known type.
pub type TypeToken = Result<ScalarType, String>;

/// A single parsed header line.
#[derive(Debug, PartialEq, Clone)]
pub enum HeaderLine {
    /// The `ply` magic line.
    Magic,
    /// A `format <encoding> <version>` line. The encoding token is kept raw
    /// so an unknown encoding can be named in the error.
    Format { encoding: String, version: String },
    /// A `comment ...` line with the keyword and separating whitespace
    /// stripped; the remainder is verbatim.
    Comment(String),
    /// An `element <name> <count>` line; `count` is `None` when the literal
    /// does not fit `usize`.
    Element { name: String, count: Option<usize> },
    /// A `property <type> <name>` line.
    Property { ty: TypeToken, name: String },
    /// A `property list <count-type> <value-type> <name>` line.
    ListProperty {
        count_ty: TypeToken,
        value_ty: TypeToken,
        name: String,
    },
    /// The `end_header` terminator line.
    EndHeader,
}

peg::parser! {pub grammar grammar() for str {

rule space() = [' ' | '\t']+

rule line_break()
    = "\r\n" / ['\n' | '\r']

rule word() -> &'input str
    = s:$((![' ' | '\t' | '\n' | '\r'][_])+) { s }

rule ident() -> &'input str
    = s:$(['a'..='z' | 'A'..='Z' | '_']['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-']*) { s }

rule text() -> &'input str
    = s:$((!['\n' | '\r'][_])+) { s }

rule uint() -> Option<u64>
    = n:$(['0'..='9']+) { n.parse::<u64>().ok() }

rule scalar() -> TypeToken
    = t:word() { ScalarType::from_token(t).ok_or_else(|| t.to_string()) }

pub rule magic()
    = "ply"

pub rule format() -> HeaderLine
    = "format" space() e:word() space() v:word() {
        HeaderLine::Format { encoding: e.to_string(), version: v.to_string() }
    }

pub rule comment() -> HeaderLine
    = "comment" space() c:text() { HeaderLine::Comment(c.to_string()) }
    / "comment" space()? { HeaderLine::Comment(String::new()) }

pub rule element() -> HeaderLine
    = "element" space() id:ident() space() n:uint() {
        HeaderLine::Element {
            name: id.to_string(),
            count: n.and_then(|n| usize::try_from(n).ok()),
        }
    }

pub rule property() -> HeaderLine
    = "property" space() "list" space() ct:scalar() space() vt:scalar() space() id:ident() {
        HeaderLine::ListProperty { count_ty: ct, value_ty: vt, name: id.to_string() }
    }
    / "property" space() t:scalar() space() id:ident() {
        HeaderLine::Property { ty: t, name: id.to_string() }
    }

pub rule end_header()
    = "end_header"

pub rule line() -> HeaderLine
    = l:trimmed_line() space()? line_break()? { l }

rule trimmed_line() -> HeaderLine
    = magic() { HeaderLine::Magic }
    / end_header() { HeaderLine::EndHeader }
    / v:format() { v }
    / v:comment() { v }
    / v:element() { v }
    / v:property() { v }

}}

#[cfg(test)]
mod tests {
    use super::grammar as g;
    use super::HeaderLine;
    use crate::ply::ScalarType;

    macro_rules! assert_ok {
        ($e:expr) => {
            match $e {
                Ok(obj) => obj,
                Err(e) => panic!("{}", e),
            }
        };
        ($e:expr , $o:expr) => {
            let obj = assert_ok!($e);
            assert_eq!(obj, $o);
        };
    }
    macro_rules! assert_err {
        ($e:expr) => {
            let result = $e;
            assert!(result.is_err());
        };
    }

    #[test]
    fn magic_ok() {
        assert_ok!(g::magic("ply"));
        assert_ok!(g::line("ply \r\n"), HeaderLine::Magic);
    }

    #[test]
    fn magic_err() {
        assert_err!(g::magic("py"));
        assert_err!(g::magic(" ply"));
        assert_err!(g::line("plyhi"));
        assert_err!(g::line("hiply"));
    }

    #[test]
    fn format_keeps_raw_tokens() {
        assert_ok!(
            g::format("format ascii 1.0"),
            HeaderLine::Format { encoding: "ascii".to_string(), version: "1.0".to_string() }
        );
        assert_ok!(
            g::format("format binary_sideways 2.1"),
            HeaderLine::Format {
                encoding: "binary_sideways".to_string(),
                version: "2.1".to_string(),
            }
        );
    }

    #[test]
    fn format_err() {
        assert_err!(g::line("format ascii"));
        assert_err!(g::line("format ascii 1.0 surplus"));
    }

    #[test]
    fn comment_strips_keyword_and_separator() {
        assert_ok!(g::comment("comment hi"), HeaderLine::Comment("hi".to_string()));
        assert_ok!(
            g::comment("comment   hi, a comment!"),
            HeaderLine::Comment("hi, a comment!".to_string())
        );
        assert_ok!(g::comment("comment"), HeaderLine::Comment(String::new()));
        assert_ok!(g::comment("comment "), HeaderLine::Comment(String::new()));
        assert_ok!(g::comment("comment\thi"), HeaderLine::Comment("hi".to_string()));
    }

    #[test]
    fn comment_err() {
        assert_err!(g::line("commentt"));
        assert_err!(g::comment("comment hi\nmore"));
    }

    #[test]
    fn element_ok() {
        assert_ok!(
            g::element("element vertex 8"),
            HeaderLine::Element { name: "vertex".to_string(), count: Some(8) }
        );
    }

    #[test]
    fn element_err() {
        assert_err!(g::line("element 8 vertex"));
        assert_err!(g::line("element vertex -2"));
    }

    #[test]
    fn element_count_overflow_is_captured() {
        let line = assert_ok!(g::element("element v 99999999999999999999999999"));
        assert_eq!(
            line,
            HeaderLine::Element { name: "v".to_string(), count: None }
        );
    }

    #[test]
    fn property_ok() {
        assert_ok!(
            g::property("property char c"),
            HeaderLine::Property { ty: Ok(ScalarType::Char), name: "c".to_string() }
        );
        assert_ok!(
            g::property("property float32 x"),
            HeaderLine::Property { ty: Ok(ScalarType::Float), name: "x".to_string() }
        );
    }

    #[test]
    fn property_unknown_type_is_captured() {
        assert_ok!(
            g::property("property quaternion q"),
            HeaderLine::Property { ty: Err("quaternion".to_string()), name: "q".to_string() }
        );
    }

    #[test]
    fn property_list_ok() {
        assert_ok!(
            g::property("property list uchar int vertex_indices"),
            HeaderLine::ListProperty {
                count_ty: Ok(ScalarType::UChar),
                value_ty: Ok(ScalarType::Int),
                name: "vertex_indices".to_string(),
            }
        );
    }

    #[test]
    fn line_endings() {
        assert_ok!(g::line("end_header"), HeaderLine::EndHeader);
        assert_ok!(g::line("end_header\n"), HeaderLine::EndHeader);
        assert_ok!(g::line("end_header\r"), HeaderLine::EndHeader);
        assert_ok!(g::line("end_header\r\n"), HeaderLine::EndHeader);
        assert_ok!(g::line("property list uchar int vertex_indices \n"));
    }
}
