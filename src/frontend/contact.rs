use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement};

use super::dom::{self, Teardown};
use crate::fx::contact::{ContactSubmission, SUCCESS_CLASS, SUCCESS_MESSAGE};

const FORM_ID: &str = "contactForm";

fn read_submission(form: &HtmlFormElement) -> ContactSubmission {
    let data = FormData::new_with_form(form).ok();
    ContactSubmission::from_fields(|field| data.as_ref()?.get(field).as_string())
}

fn show_success(form: &HtmlFormElement) {
    form.set_inner_html("");

    let Some(message) = dom::document().and_then(|d| d.create_element("div").ok()) else {
        return;
    };
    message.set_class_name(SUCCESS_CLASS);
    message.set_text_content(Some(SUCCESS_MESSAGE));
    let _ = form.append_child(&message);
}

/// Swallows the contact form submission: the fields are logged and the form
/// is replaced by a confirmation. Nothing leaves the page.
pub fn install() -> Teardown {
    let mut teardown = Teardown::default();
    let Some(form) = dom::document()
        .and_then(|d| d.get_element_by_id(FORM_ID))
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    else {
        return teardown;
    };

    let target = form.clone();
    teardown.listen(EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();

            let submission = read_submission(&target);
            log::info!("contact form submitted: {}", submission.log_line());
            show_success(&target);
        },
    ));
    teardown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::dom::fixture;
    use wasm_bindgen_test::wasm_bindgen_test;
    use web_sys::Event;

    #[wasm_bindgen_test]
    fn empty_submission_is_replaced_by_single_confirmation() {
        let host = fixture::mount(
            r#"<form id="contactForm">
                <input name="name"><input name="email"><textarea name="message"></textarea>
            </form>"#,
        );
        let teardown = install();
        let form: HtmlFormElement = fixture::find(&host, "form");

        let submit = Event::new("submit").expect("create submit event");
        form.dispatch_event(&submit).expect("dispatch submit");

        assert_eq!(form.child_element_count(), 1);
        let confirmation = form.first_element_child().expect("confirmation rendered");
        assert_eq!(confirmation.class_name(), SUCCESS_CLASS);
        assert_eq!(form.text_content().as_deref(), Some(SUCCESS_MESSAGE));

        drop(teardown);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn named_fields_are_read_from_the_form() {
        let host = fixture::mount(
            r#"<form class="filled-form">
                <input name="name" value="Ada">
                <input name="email" value="ada@example.com">
                <textarea name="message">hello there</textarea>
            </form>"#,
        );
        let form: HtmlFormElement = fixture::find(&host, ".filled-form");

        let submission = read_submission(&form);
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "hello there");

        show_success(&form);
        show_success(&form);
        assert_eq!(form.child_element_count(), 1);

        host.remove();
    }

    #[wasm_bindgen_test]
    fn form_without_fields_reads_empty_strings() {
        let host = fixture::mount(r#"<form class="bare-form"></form>"#);
        let form: HtmlFormElement = fixture::find(&host, ".bare-form");

        assert_eq!(read_submission(&form), ContactSubmission::default());

        host.remove();
    }
}
