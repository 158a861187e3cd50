//! JSON-RPC clients against a loopback callback server

use flate2::Compression;
use flate2::write::GzEncoder;
use rqc_step::StepError;
use rqc_step::clients::{BbToolsClient, DataFileUtilClient, RpcClient};
use rqc_step::filter::{FilterConfig, FilterOptions, FilterResult, FilterStep};
use serde_json::{Value, json};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

/// What the stub server saw.
struct Captured {
    headers: Vec<String>,
    body: Value,
}

/// Answer exactly one request with `status` and `body`.
fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        captured
    });

    (url, handle)
}

fn read_request(stream: &mut TcpStream) -> Captured {
    let mut reader = BufReader::new(stream);
    let mut headers = Vec::new();
    let mut content_length = 0;

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end().to_string();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap();
        }
        headers.push(line);
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();
    Captured {
        headers,
        body: serde_json::from_slice(&body).unwrap(),
    }
}

fn rpc_result(value: Value) -> String {
    json!({"version": "1.1", "id": "1", "result": [value]}).to_string()
}

fn delegate_step(url: &str) -> FilterStep {
    FilterStep::new(FilterConfig::new(url, "/tmp/scratch", FilterOptions::default())).unwrap()
}

#[test]
fn test_delegate_sends_exact_rqcfilter_call() {
    let response = json!({
        "output_directory": "/kb/module/work/tmp/rqcfilter_out",
        "filtered_fastq_file": "/kb/module/work/tmp/rqcfilter_out/sample.anqdpht.fastq.gz",
        "run_log": "/kb/module/work/tmp/rqcfilter_out/rqcfilter.log"
    });
    let (url, server) = serve_once("200 OK", rpc_result(response.clone()));

    let result = delegate_step(&url).execute("/data/sample.fastq").unwrap();
    let captured = server.join().unwrap();

    let expected: FilterResult = serde_json::from_value(response).unwrap();
    assert_eq!(result, expected);

    assert_eq!(captured.body["method"], "BBTools.run_RQCFilter_local");
    assert_eq!(captured.body["version"], "1.1");
    assert_eq!(captured.body["context"]["service_ver"], "beta");
    assert_eq!(captured.body["params"][0], json!({"reads_file": "/data/sample.fastq"}));
    assert_eq!(
        captured.body["params"][1],
        json!({
            "rna": 0,
            "trimfragadapter": 1,
            "qtrim": "r",
            "trimq": 0,
            "maxns": 3,
            "minavgquality": 3,
            "minlength": 51,
            "mlf": 0.333,
            "phix": 1,
            "removehuman": 1,
            "removedog": 1,
            "removecat": 1,
            "removemouse": 1,
            "khist": 1,
            "removemicrobes": 1,
            "clumpify": 1
        })
    );
}

#[test]
fn test_delegate_returns_service_error() {
    let body = json!({
        "version": "1.1",
        "error": {
            "name": "JSONRPCError",
            "code": -32000,
            "message": "RQCFilter failed: out of memory",
            "error": "Traceback (most recent call last): ..."
        }
    })
    .to_string();
    let (url, server) = serve_once("500 Internal Server Error", body);

    let err = delegate_step(&url).execute("/data/sample.fastq").unwrap_err();
    server.join().unwrap();

    match err {
        StepError::Remote { method, code, message, .. } => {
            assert_eq!(method, "BBTools.run_RQCFilter_local");
            assert_eq!(code, -32000);
            assert_eq!(message, "RQCFilter failed: out of memory");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn test_delegate_rejects_incomplete_result() {
    let (url, server) = serve_once(
        "200 OK",
        rpc_result(json!({"output_directory": "/o", "run_log": "/o/log"})),
    );

    let err = delegate_step(&url).execute("/data/sample.fastq").unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, StepError::MalformedResponse { .. }));
}

#[test]
fn test_unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = delegate_step(&url).execute("/data/sample.fastq").unwrap_err();

    assert!(matches!(err, StepError::Transport { .. }));
}

#[test]
fn test_auth_token_sent_as_authorization_header() {
    let response = json!({
        "output_directory": "/o",
        "filtered_fastq_file": "/o/r.fastq.gz",
        "run_log": "/o/log"
    });
    let (url, server) = serve_once("200 OK", rpc_result(response));

    let rpc = RpcClient::new(url.clone(), Some("TOKEN123".to_string())).unwrap();
    let step = FilterStep::with_clients(
        FilterConfig::new(url, "/tmp/scratch", FilterOptions::default()),
        BbToolsClient::new(rpc.clone(), "beta"),
        DataFileUtilClient::new(rpc, "release"),
    );
    step.execute("/data/sample.fastq").unwrap();
    let captured = server.join().unwrap();

    assert!(
        captured
            .headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case("authorization: TOKEN123"))
    );
}

#[test]
fn test_skip_moves_remotely_packed_file() {
    let temp_dir = TempDir::new().unwrap();
    let scratch = temp_dir.path().join("scratch");
    let reads = temp_dir.path().join("sample.fastq");
    let content = "@r1\nACGT\n+\nIIII\n";
    fs::write(&reads, content).unwrap();

    // what DataFileUtil would have written
    let packed = temp_dir.path().join("sample.fastq.gz");
    let mut encoder = GzEncoder::new(File::create(&packed).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let (url, server) = serve_once("200 OK", rpc_result(json!({"file_path": &packed})));
    let step = FilterStep::new(FilterConfig::new(
        url,
        &scratch,
        FilterOptions {
            skip_rqcfilter: true,
            debug: false,
        },
    ))
    .unwrap();

    let result = step.execute(&reads).unwrap();
    let captured = server.join().unwrap();

    assert_eq!(captured.body["method"], "DataFileUtil.pack_file");
    assert_eq!(
        captured.body["params"][0],
        json!({"file_path": &reads, "pack": "gzip"})
    );

    assert!(!packed.exists());
    assert_eq!(result.filtered_fastq_file, result.output_directory.join("sample.fastq.gz"));
    assert!(result.filtered_fastq_file.exists());
    assert_eq!(fs::metadata(&result.run_log).unwrap().len(), 0);
    assert_eq!(result.output_directory.parent(), Some(scratch.as_path()));
}
