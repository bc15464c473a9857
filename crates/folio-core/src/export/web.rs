//! Web serializers: standalone HTML page and MIME web archive

use super::escape::{encoded_header_value, escape_xml};
use super::payload::{DocumentMeta, ExportContent};
use super::serializer::Serializer;
use crate::format::{FormatDescriptor, FormatKind};

/// Boundary token separating web archive parts
pub const ARCHIVE_BOUNDARY: &str = "FOLIO_BOUNDARY";

/// Sender address written into web archive headers
pub const ARCHIVE_SENDER: &str = "<export@folio.local>";

const PAGE_STYLE: &str = r#"        body {
            font-family: 'Inter', Arial, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        .document-info {
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
            margin-bottom: 30px;
            border-left: 4px solid #2563eb;
        }
        .duo-export {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 20px;
        }
        .panel {
            padding: 20px;
            border: 1px solid #e2e8f0;
            border-radius: 8px;
            background: #f8fafc;
        }
"#;

/// Self-contained HTML document with embedded style and metadata block
pub struct WebPageSerializer;

impl Serializer for WebPageSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::WebPage
    }

    fn media_type(&self) -> &str {
        "text/html"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        let title = escape_xml(&meta.title);
        let author = escape_xml(&meta.author);
        let generator = escape_xml(&meta.generator);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="author" content="{author}">
    <meta name="generator" content="{generator}">
    <style>
{style}    </style>
</head>
<body>
    <div class="document-info">
        <h1>{title}</h1>
        <p><strong>Author:</strong> {author}</p>
        <p><strong>Date:</strong> {date}</p>
        <p><strong>Generated with:</strong> {generator}</p>
    </div>
    <div class="content">
        {body}
    </div>
</body>
</html>
"#,
            style = PAGE_STYLE,
            date = meta.created_at.format("%Y-%m-%d"),
            body = content.markup,
        )
    }
}

/// `multipart/related` archive with a single HTML part
///
/// Lines end in CRLF throughout, including inside the HTML part. A
/// non-ASCII subject is sent as RFC 2047 encoded words. Body lines that
/// start with the boundary delimiter are indented by one space so the
/// archive keeps exactly one part.
pub struct WebArchiveSerializer;

impl Serializer for WebArchiveSerializer {
    fn kind(&self) -> FormatKind {
        FormatKind::WebArchive
    }

    fn media_type(&self) -> &str {
        "message/rfc822"
    }

    fn render(&self, _format: &FormatDescriptor, content: &ExportContent, meta: &DocumentMeta) -> String {
        let message = format!(
            "From: {sender}\n\
             Subject: {subject}\n\
             Date: {date}\n\
             MIME-Version: 1.0\n\
             Content-Type: multipart/related; boundary=\"{boundary}\"\n\
             \n\
             --{boundary}\n\
             Content-Type: text/html; charset=\"utf-8\"\n\
             Content-Transfer-Encoding: 8bit\n\
             \n\
             <!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <title>{title}</title>\n\
             <meta name=\"author\" content=\"{author}\">\n\
             <meta name=\"generator\" content=\"{generator}\">\n\
             </head>\n\
             <body>\n\
             {body}\n\
             </body>\n\
             </html>\n\
             \n\
             --{boundary}--\n",
            sender = ARCHIVE_SENDER,
            subject = encoded_header_value(&meta.title),
            date = meta.created_at.to_rfc2822(),
            boundary = ARCHIVE_BOUNDARY,
            title = escape_xml(&meta.title),
            author = escape_xml(&meta.author),
            generator = escape_xml(&meta.generator),
            body = guard_boundary(&content.markup),
        );

        to_crlf(&message)
    }
}

fn guard_boundary(markup: &str) -> String {
    let delimiter = format!("--{}", ARCHIVE_BOUNDARY);
    markup
        .split('\n')
        .map(|line| {
            if line.starts_with(&delimiter) {
                format!(" {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
