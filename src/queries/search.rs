use super::{GraphqlDocument, PRODUCT_ITEM_FRAGMENT};

pub static PRODUCTS_SEARCH_QUERY: GraphqlDocument = GraphqlDocument {
    name: "ProductsSearch",
    source: r#"
  query ProductsSearch(
    $country: CountryCode
    $endCursor: String
    $first: Int
    $language: LanguageCode
    $last: Int
    $filters: [ProductFilter!]
    $searchTerm: String!
    $startCursor: String
    $sortKey: SearchSortKeys
    $reverse: Boolean
  ) @inContext(country: $country, language: $language) {
    search(
      first: $first
      last: $last
      before: $startCursor
      after: $endCursor
      productFilters: $filters
      query: $searchTerm
      types: PRODUCT
      sortKey: $sortKey
      reverse: $reverse
    ) {
      nodes {
        ... on Product {
          ...ProductItemFragment
        }
      }
      filters: productFilters {
        id
        label
        type
        values {
          id
          label
          count
          input
          swatch {
            color
            image {
              mediaContentType
              previewImage {
                height
                id
                url
                width
                altText
              }
              id
              alt
            }
          }
        }
      }
      pageInfo {
        startCursor
        endCursor
        hasNextPage
        hasPreviousPage
      }
      totalCount
    }
  }
"#,
    fragments: &[&PRODUCT_ITEM_FRAGMENT],
};

/// Facets for a term; only one node is requested
pub static PRODUCTS_SEARCH_FILTERS_QUERY: GraphqlDocument = GraphqlDocument {
    name: "ProductsSearchFilters",
    source: r#"
  query ProductsSearchFilters(
    $country: CountryCode
    $language: LanguageCode
    $searchTerm: String!
  ) @inContext(country: $country, language: $language) {
    search(first: 1, query: $searchTerm, types: PRODUCT) {
      filters: productFilters {
        id
        label
        type
        values {
          id
          label
          count
          input
        }
      }
    }
  }
"#,
    fragments: &[],
};

pub static PREDICTIVE_COLLECTION_FRAGMENT: GraphqlDocument = GraphqlDocument {
    name: "PredictiveCollectionFragment",
    source: r#"
  fragment PredictiveCollectionFragment on Collection {
    __typename
    id
    title
    handle
    image {
      url
      altText
      width
      height
    }
  }
"#,
    fragments: &[],
};

pub static PREDICTIVE_QUERY_FRAGMENT: GraphqlDocument = GraphqlDocument {
    name: "PredictiveQueryFragment",
    source: r#"
  fragment PredictiveQueryFragment on SearchQuerySuggestion {
    __typename
    text
    styledText
  }
"#,
    fragments: &[],
};

pub static PREDICTIVE_SEARCH_QUERY: GraphqlDocument = GraphqlDocument {
    name: "PredictiveSearch",
    source: r#"
  query PredictiveSearch(
    $country: CountryCode
    $language: LanguageCode
    $limit: Int!
    $limitScope: PredictiveSearchLimitScope!
    $searchTerm: String!
    $types: [PredictiveSearchType!]
  ) @inContext(country: $country, language: $language) {
    predictiveSearch(
      limit: $limit
      limitScope: $limitScope
      query: $searchTerm
      types: $types
    ) {
      collections {
        ...PredictiveCollectionFragment
      }
      queries {
        ...PredictiveQueryFragment
      }
    }
  }
"#,
    fragments: &[&PREDICTIVE_COLLECTION_FRAGMENT, &PREDICTIVE_QUERY_FRAGMENT],
};
