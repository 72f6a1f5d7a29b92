use rstest::rstest;

use super::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.per_page, 20);
}

#[rstest]
#[case(1, 20, 0)]
#[case(2, 20, 20)]
#[case(3, 50, 100)]
#[case(0, 20, 0)]
fn test_page_request_offset(#[case] page: u32, #[case] per_page: u32, #[case] expected: u64) {
    assert_eq!(PageRequest::new(page, per_page).offset(), expected);
}

#[test]
fn test_page_request_limit() {
    let request = PageRequest {
        page: 1,
        per_page: 50,
    };
    assert_eq!(request.limit(), 50);
}

#[test]
fn test_page_request_clamped() {
    let request = PageRequest::new(0, 500).clamped(100);
    assert_eq!(request, PageRequest::new(1, 100));

    let request = PageRequest::new(4, 10).clamped(100);
    assert_eq!(request, PageRequest::new(4, 10));
    assert_eq!(request.page_index(), 3);
}

#[test]
fn test_page_response_new() {
    let data = vec![1, 2, 3];
    let response = PageResponse::new(data.clone(), 1, 10, 3);

    assert_eq!(response.data, data);
    assert_eq!(response.meta.page, 1);
    assert_eq!(response.meta.per_page, 10);
    assert_eq!(response.meta.total, 3);
    assert_eq!(response.meta.total_pages, 1);
}

#[rstest]
#[case(25, 10, 3)]
#[case(30, 10, 3)]
#[case(31, 10, 4)]
#[case(0, 10, 1)]
#[case(5, 0, 1)]
fn test_page_meta_total_pages(#[case] total: u64, #[case] per_page: u32, #[case] pages: u32) {
    assert_eq!(PageMeta::new(1, per_page, total).total_pages, pages);
}
