//! Optional Dublin-core terms of the collection metadata, as edited in the form.

use common::model::collection::CollectionMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataTerm {
    Subject,
    Publisher,
    Contributor,
    Date,
    Type,
    Format,
    Identifier,
    Source,
    Language,
    Relation,
    Coverage,
    Rights,
}

impl MetadataTerm {
    pub const ALL: [MetadataTerm; 12] = [
        MetadataTerm::Subject,
        MetadataTerm::Publisher,
        MetadataTerm::Contributor,
        MetadataTerm::Date,
        MetadataTerm::Type,
        MetadataTerm::Format,
        MetadataTerm::Identifier,
        MetadataTerm::Source,
        MetadataTerm::Language,
        MetadataTerm::Relation,
        MetadataTerm::Coverage,
        MetadataTerm::Rights,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetadataTerm::Subject => "Subject",
            MetadataTerm::Publisher => "Publisher",
            MetadataTerm::Contributor => "Contributor",
            MetadataTerm::Date => "Date",
            MetadataTerm::Type => "Type",
            MetadataTerm::Format => "Format",
            MetadataTerm::Identifier => "Identifier",
            MetadataTerm::Source => "Source",
            MetadataTerm::Language => "Language",
            MetadataTerm::Relation => "Relation",
            MetadataTerm::Coverage => "Coverage",
            MetadataTerm::Rights => "Rights",
        }
    }

    pub fn slot(self, metadata: &mut CollectionMetadata) -> &mut Option<String> {
        match self {
            MetadataTerm::Subject => &mut metadata.subject,
            MetadataTerm::Publisher => &mut metadata.publisher,
            MetadataTerm::Contributor => &mut metadata.contributor,
            MetadataTerm::Date => &mut metadata.date,
            MetadataTerm::Type => &mut metadata.kind,
            MetadataTerm::Format => &mut metadata.format,
            MetadataTerm::Identifier => &mut metadata.identifier,
            MetadataTerm::Source => &mut metadata.source,
            MetadataTerm::Language => &mut metadata.language,
            MetadataTerm::Relation => &mut metadata.relation,
            MetadataTerm::Coverage => &mut metadata.coverage,
            MetadataTerm::Rights => &mut metadata.rights,
        }
    }

    pub fn value(self, metadata: &CollectionMetadata) -> Option<&str> {
        let value = match self {
            MetadataTerm::Subject => &metadata.subject,
            MetadataTerm::Publisher => &metadata.publisher,
            MetadataTerm::Contributor => &metadata.contributor,
            MetadataTerm::Date => &metadata.date,
            MetadataTerm::Type => &metadata.kind,
            MetadataTerm::Format => &metadata.format,
            MetadataTerm::Identifier => &metadata.identifier,
            MetadataTerm::Source => &metadata.source,
            MetadataTerm::Language => &metadata.language,
            MetadataTerm::Relation => &metadata.relation,
            MetadataTerm::Coverage => &metadata.coverage,
            MetadataTerm::Rights => &metadata.rights,
        };
        value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_and_value_address_the_same_term() {
        let mut metadata = CollectionMetadata::default();
        for term in MetadataTerm::ALL {
            *term.slot(&mut metadata) = Some(term.label().to_lowercase());
        }

        assert_eq!(MetadataTerm::Type.value(&metadata), Some("type"));
        assert_eq!(metadata.kind.as_deref(), Some("type"));
        assert_eq!(MetadataTerm::Rights.value(&metadata), Some("rights"));
    }
}
