use fileserve::http::mime::MimeType;
use fileserve::http::response::{Response, ResponseBuilder, StatusCode};
use fileserve::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_defaults_to_text_plain() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(b"Hello, World!".to_vec())
        .build();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.mime, MimeType::TextPlain);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_response_builder_with_mime() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .mime(MimeType::TextHtml)
        .body(b"<p>hi</p>".to_vec())
        .build();

    assert_eq!(response.mime, MimeType::TextHtml);
}

#[test]
fn test_response_content_length_tracks_body() {
    let response = Response::ok("Successfully put");
    assert_eq!(response.content_length(), "Successfully put".len());

    let empty = ResponseBuilder::new(StatusCode::Ok).build();
    assert_eq!(empty.content_length(), 0);
}

#[test]
fn test_response_helpers() {
    let not_found = Response::not_found();
    assert_eq!(not_found.status, StatusCode::NotFound);
    assert_eq!(not_found.body, b"Not Exists".to_vec());

    let internal = Response::internal_error();
    assert_eq!(internal.status, StatusCode::InternalServerError);
    assert_eq!(internal.body, b"Internal Server Error".to_vec());
}

#[test]
fn test_serialize_response_layout() {
    let response = Response::ok("done");
    let bytes = serialize_response(&response);

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\ndone".to_vec()
    );
}

#[test]
fn test_serialize_response_binary_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(vec![0, 159, 146, 150])
        .build();
    let bytes = serialize_response(&response);

    assert!(bytes.ends_with(&[b'\n', 0, 159, 146, 150]));
    assert!(String::from_utf8_lossy(&bytes).contains("Content-Length: 4\r\n"));
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::text(StatusCode::BadRequest, "Malformed headers");
    let mut out: Vec<u8> = Vec::new();

    ResponseWriter::new(&response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    assert_eq!(out, serialize_response(&response));
    assert!(out.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
}
