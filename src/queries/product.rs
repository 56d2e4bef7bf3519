use super::GraphqlDocument;

/// Product fields shared by search results and the product feed
pub static PRODUCT_ITEM_FRAGMENT: GraphqlDocument = GraphqlDocument {
    name: "ProductItemFragment",
    source: r#"
  fragment ProductItemFragment on Product {
    id
    title
    handle
    vendor
    productType
    description
    isGiftCard
    availableForSale
    featuredImage {
      url
      altText
      width
      height
    }
    priceRange {
      minVariantPrice {
        amount
        currencyCode
      }
    }
    variants(first: 250) {
      nodes {
        id
        sku
        title
        availableForSale
        weight
        weightUnit
        price {
          amount
          currencyCode
        }
        image {
          url
          altText
          width
          height
        }
        selectedOptions {
          name
          value
        }
      }
    }
  }
"#,
    fragments: &[],
};

/// One page of the full catalog, walked by the feed generator
pub static PRODUCT_FEED_QUERY: GraphqlDocument = GraphqlDocument {
    name: "ProductFeed",
    source: r#"
  query ProductFeed(
    $country: CountryCode
    $language: LanguageCode
    $first: Int!
    $cursor: String
  ) @inContext(country: $country, language: $language) {
    products(first: $first, after: $cursor) {
      nodes {
        ...ProductItemFragment
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
"#,
    fragments: &[&PRODUCT_ITEM_FRAGMENT],
};
