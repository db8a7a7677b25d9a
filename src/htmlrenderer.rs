//! Implements a custom [`push_html`] on top of [`pulldown_cmark`]'s event
//! stream. Compared to [`pulldown_cmark::html::push_html`] it can render
//! soft line breaks as `<br />` (so single newlines in a post are kept, the
//! way a chat-style editor shows them), it gives every `h1`–`h3` an `id`
//! anchor and reports those headings back for the table of contents, and it
//! tags fenced code blocks with `language-*` classes for the highlighter.

use pulldown_cmark::escape::{escape_href, escape_html, StrWrite};
use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, LinkType, Tag};
use std::fmt::{self, Display};
use std::io;

use crate::toc::{Heading, MAX_LEVEL};

struct Adaptor<'a, T> {
    formatter: &'a mut T,
    result: fmt::Result,
}

impl<T> Adaptor<'_, T> {
    fn handle_result(&mut self, result: fmt::Result) -> io::Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.result = result;
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

impl<T: fmt::Write> StrWrite for Adaptor<'_, T> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        let result = self.formatter.write_str(s);
        self.handle_result(result)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let result = self.formatter.write_fmt(args);
        self.handle_result(result)
    }
}

struct EscapeHref<'a>(CowStr<'a>);

impl<'a> Display for EscapeHref<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };
        let _ = escape_href(&mut adaptor, &self.0);
        adaptor.result
    }
}

struct EscapeHtml<'a>(CowStr<'a>);

impl<'a> Display for EscapeHtml<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };

        let _ = escape_html(&mut adaptor, &self.0);
        adaptor.result
    }
}

enum TableState {
    Head,
    Body,
}

/// A heading whose inner HTML is still being rendered. The heading is only
/// written once its end tag arrives, because its `id` depends on its full
/// text.
#[derive(Default)]
struct PendingHeading {
    html: String,
    text: String,
}

/// An image whose alt text is still being collected.
struct PendingImage<'a> {
    dest: CowStr<'a>,
    title: CowStr<'a>,
    alt: String,
}

/// Renders markdown [`Event`]s into HTML. This is largely modeled after
/// [`pulldown_cmark`]'s private [`HtmlWriter`
/// struct](https://github.com/raphlinus/pulldown-cmark/blob/bf0a1a4938dbd2ec41c3add069b3d361d11731f4/src/html.rs#L36-L50).
struct HtmlRenderer<'a> {
    table_alignments: Vec<Alignment>,
    table_state: TableState,
    table_cell_index: usize,

    /// Render soft breaks as `<br />` instead of newlines.
    line_breaks: bool,

    pending_heading: Option<PendingHeading>,
    pending_image: Option<PendingImage<'a>>,

    /// The `h1`–`h3` headings seen so far, in document order.
    headings: Vec<Heading>,
}

impl<'a> HtmlRenderer<'a> {
    fn new(line_breaks: bool) -> Self {
        HtmlRenderer {
            table_alignments: Vec::default(),
            table_state: TableState::Head,
            table_cell_index: usize::default(),
            line_breaks,
            pending_heading: None,
            pending_image: None,
            headings: Vec::new(),
        }
    }

    fn on_event<W: StrWrite>(
        &mut self,
        w: &mut W,
        event: Event<'a>,
    ) -> io::Result<()> {
        if self.pending_image.is_some() {
            return match event {
                Event::End(Tag::Image(_, _, _)) => {
                    match self.pending_heading.take() {
                        Some(mut heading) => {
                            let result = self.finish_image(&mut heading.html);
                            self.pending_heading = Some(heading);
                            result
                        }
                        None => self.finish_image(w),
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some(image) = &mut self.pending_image {
                        image.alt.push_str(&text);
                    }
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        if let Some(mut heading) = self.pending_heading.take() {
            if let Event::End(Tag::Heading(level)) = event {
                return self.finish_heading(w, level, heading);
            }
            if let Event::Text(text) | Event::Code(text) = &event {
                heading.text.push_str(text);
            }
            let result = self.render(&mut heading.html, event);
            self.pending_heading = Some(heading);
            return result;
        }

        match event {
            Event::Start(Tag::Heading(level)) if level <= MAX_LEVEL => {
                self.pending_heading = Some(PendingHeading::default());
                Ok(())
            }
            event => self.render(w, event),
        }
    }

    fn render<W: StrWrite>(
        &mut self,
        w: &mut W,
        event: Event<'a>,
    ) -> io::Result<()> {
        match event {
            Event::Start(tag) => self.on_start(w, tag),
            Event::End(tag) => self.on_end(w, tag),
            Event::Code(code) => self.on_code(w, code),
            // Footnotes aren't enabled in the parser options.
            Event::FootnoteReference(_) => Ok(()),
            Event::HardBreak => self.on_hard_break(w),
            Event::Html(html) => self.on_html(w, html),
            Event::Rule => self.on_rule(w),
            Event::SoftBreak => self.on_soft_break(w),
            Event::TaskListMarker(checked) => {
                self.on_task_list_marker(w, checked)
            }
            Event::Text(text) => self.on_text(w, text),
        }
    }

    fn finish_heading<W: StrWrite>(
        &mut self,
        w: &mut W,
        level: u32,
        pending: PendingHeading,
    ) -> io::Result<()> {
        let heading = Heading::new(level, pending.text);
        write!(
            w,
            r#"<h{} id="{}">{}</h{}>"#,
            level,
            EscapeHtml(CowStr::from(heading.id.as_str())),
            pending.html,
            level,
        )?;
        self.headings.push(heading);
        Ok(())
    }

    fn finish_image<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        match self.pending_image.take() {
            None => Ok(()),
            Some(image) => write!(
                w,
                r#"<img src="{}" alt="{}" title="{}">"#,
                EscapeHref(image.dest),
                EscapeHtml(CowStr::from(image.alt)),
                EscapeHtml(image.title),
            ),
        }
    }

    fn on_start<W: StrWrite>(
        &mut self,
        w: &mut W,
        tag: Tag<'a>,
    ) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => write!(w, "<blockquote>"),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => {
                    match info.split(' ').next().unwrap_or("") {
                        "" => write!(w, "<pre><code>"),
                        lang => write!(
                            w,
                            r#"<pre><code class="language-{}">"#,
                            EscapeHtml(CowStr::from(lang))
                        ),
                    }
                }
                CodeBlockKind::Indented => w.write_str("<pre><code>"),
            },
            Tag::Emphasis => w.write_str("<em>"),
            Tag::FootnoteDefinition(_) => Ok(()),
            Tag::Heading(size) => write!(w, "<h{}>", size),
            Tag::Image(_link_type, dest, title) => {
                self.pending_image = Some(PendingImage {
                    dest,
                    title,
                    alt: String::new(),
                });
                Ok(())
            }
            Tag::Item => w.write_str("<li>"),
            Tag::Link(LinkType::Email, dest, title) => write!(
                w,
                r#"<a href="mailto:{}" title="{}">"#,
                EscapeHref(dest),
                EscapeHtml(title),
            ),
            Tag::Link(_link_type, dest, title) => write!(
                w,
                r#"<a href="{}" title="{}">"#,
                EscapeHref(dest),
                EscapeHtml(title),
            ),
            Tag::List(None) => w.write_str("<ul>"),
            Tag::List(Some(1)) => w.write_str("<ol>"),
            Tag::List(Some(start)) => write!(w, r#"<ol start="{}">"#, start),
            Tag::Paragraph => write!(w, "<p>"),
            Tag::Strikethrough => w.write_str("<del>"),
            Tag::Strong => w.write_str("<strong>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                w.write_str("<table>")
            }
            Tag::TableHead => {
                self.table_state = TableState::Head;
                self.table_cell_index = 0;
                w.write_str("<thead><tr>")
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                w.write_str("<tr>")
            }
            Tag::TableCell => write!(
                w,
                "<{}{}>",
                match self.table_state {
                    TableState::Head => "th",
                    TableState::Body => "td",
                },
                match self.table_alignments.get(self.table_cell_index) {
                    Some(Alignment::Left) => r#" align="left""#,
                    Some(Alignment::Right) => r#" align="right""#,
                    Some(Alignment::Center) => r#" align="center""#,
                    _ => "",
                }
            ),
        }
    }

    fn on_end<W: StrWrite>(&mut self, w: &mut W, tag: Tag) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => w.write_str("</blockquote>"),
            Tag::CodeBlock(_) => w.write_str("</code></pre>"),
            Tag::Emphasis => w.write_str("</em>"),
            Tag::FootnoteDefinition(_) => Ok(()),
            Tag::Heading(level) => write!(w, "</h{}>", level),
            Tag::Image(_, _, _) => Ok(()), // handled in finish_image
            Tag::Item => w.write_str("</li>"),
            Tag::Link(_, _, _) => w.write_str("</a>"),
            Tag::List(Some(_)) => w.write_str("</ol>"),
            Tag::List(None) => w.write_str("</ul>"),
            Tag::Paragraph => w.write_str("</p>"),
            Tag::Strikethrough => w.write_str("</del>"),
            Tag::Strong => w.write_str("</strong>"),
            Tag::Table(_) => w.write_str("</tbody></table>"),
            Tag::TableHead => {
                self.table_state = TableState::Body;
                w.write_str("</tr></thead><tbody>")
            }
            Tag::TableRow => w.write_str("</tr>"),
            Tag::TableCell => {
                self.table_cell_index += 1;
                w.write_str(match self.table_state {
                    TableState::Head => "</th>",
                    TableState::Body => "</td>",
                })
            }
        }
    }

    fn on_text<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        escape_html(w, &s)
    }

    fn on_code<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        write!(w, "<code>{}</code>", EscapeHtml(s))
    }

    fn on_html<W: StrWrite>(
        &mut self,
        w: &mut W,
        s: CowStr,
    ) -> io::Result<()> {
        w.write_str(&s)
    }

    fn on_soft_break<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        match self.line_breaks {
            true => w.write_str("<br />"),
            false => w.write_str("\n"),
        }
    }

    fn on_hard_break<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_str("<br />")
    }

    fn on_rule<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_str("<hr />")
    }

    fn on_task_list_marker<W: StrWrite>(
        &mut self,
        w: &mut W,
        checked: bool,
    ) -> io::Result<()> {
        write!(
            w,
            r#"<input disabled="" type="checkbox" {}/>"#,
            match checked {
                true => r#"checked="" "#,
                false => "",
            }
        )
    }
}

/// Converts [`Event`]s into an HTML string much like
/// `pulldown_cmark::html::push_html`, with optional `<br />` soft breaks and
/// anchored headings. Returns the `h1`–`h3` headings in document order.
pub fn push_html<'a, I>(
    out: &mut String,
    events: I,
    line_breaks: bool,
) -> io::Result<Vec<Heading>>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut renderer = HtmlRenderer::new(line_breaks);
    for event in events {
        renderer.on_event(out, event)?;
    }
    Ok(renderer.headings)
}
