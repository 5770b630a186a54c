/// Decides whether the parsed first line of a CSV file is a header row.
pub trait HeaderHeuristic {
    fn has_header(&self, fields: &[String]) -> bool;
}

/// Treats any first line with more than one field as a header.
///
/// This does not look at the content at all, so a single-column file with a
/// genuine header is reported as headerless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiColumnHeuristic;

impl HeaderHeuristic for MultiColumnHeuristic {
    fn has_header(&self, fields: &[String]) -> bool {
        fields.len() > 1
    }
}

impl<F> HeaderHeuristic for F
where
    F: Fn(&[String]) -> bool,
{
    fn has_header(&self, fields: &[String]) -> bool {
        self(fields)
    }
}
