use url::Url;

/// Splits a request URL into the base-string URI (scheme, authority and
/// path; no query or fragment) and its query pairs, decoded.
pub fn url_to_endpoint_and_queries(url: &Url) -> (String, Vec<(String, String)>) {
    let queries = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    (endpoint.into(), queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_to_endpoint_and_queries() {
        let u = Url::parse(
            "https://sandbox-quickbooks.api.intuit.com/v3/company/1/query?query=SELECT+*+FROM+Customer&minorversion=65#frag",
        )
        .unwrap();
        let (core, queries) = url_to_endpoint_and_queries(&u);
        assert_eq!(core, "https://sandbox-quickbooks.api.intuit.com/v3/company/1/query");
        assert_eq!(
            queries,
            vec![
                ("query".to_string(), "SELECT * FROM Customer".to_string()),
                ("minorversion".to_string(), "65".to_string()),
            ]
        );

        let n = "https://example.com/";
        let (core, queries) = url_to_endpoint_and_queries(&Url::parse(n).unwrap());
        assert_eq!(core, n);
        assert!(queries.is_empty());
    }

    #[test]
    fn test_default_port_and_host_case_are_normalized() {
        let u = Url::parse("HTTPS://Example.COM:443/r%20v?a=%E3%83%91").unwrap();
        let (core, queries) = url_to_endpoint_and_queries(&u);
        assert_eq!(core, "https://example.com/r%20v");
        assert_eq!(queries, vec![("a".to_string(), "パ".to_string())]);
    }
}
