use contracts::shared::forms::{validate_form, FieldDef, FieldErrors, FieldInput, FormModel, FormValues};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::crud_api;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::use_notifications;

/// Create/edit form for any `FormModel` entity.
///
/// `row` decides the mode: `None` creates, `Some` edits that record. A failed
/// request keeps the dialog open with the server message.
#[component]
pub fn EntityFormDialog<T>(
    row: Option<T>,
    #[prop(into)] closing: Signal<bool>,
    on_close: Callback<()>,
    on_exited: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView
where
    T: FormModel,
{
    let notifications = use_notifications();
    let fields = StoredValue::new(T::fields());
    let id = row.as_ref().map(|r| r.id().to_string());
    let title = match &row {
        Some(r) => format!("Edit {}: {}", T::element_name(), r.title()),
        None => format!("Add {}", T::element_name()),
    };
    let initial = row.as_ref().map(|r| r.values()).unwrap_or_else(T::blank_values);

    let values = RwSignal::new(initial);
    let errors = RwSignal::new(FieldErrors::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let busy = Signal::derive(move || saving.get() || closing.get());

    let id = StoredValue::new(id);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }

        let current = values.get_untracked();
        let checked = fields.with_value(|f| validate_form(f, &current));
        let dto = checked.and_then(|_| T::dto_from(&current, id.get_value().as_deref()));
        let dto = match dto {
            Ok(dto) => dto,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        errors.set(FieldErrors::new());
        set_error.set(None);
        set_saving.set(true);

        spawn_local(async move {
            let result = match id.get_value() {
                Some(id) => crud_api::update::<_, T>(T::resource(), &id, &dto).await,
                None => crud_api::create::<_, T>(T::resource(), &dto).await,
            };
            set_saving.set(false);
            match result {
                Ok(saved) => {
                    notifications.success(format!("{} saved: {}", T::element_name(), saved.title()));
                    on_saved.run(());
                }
                Err(e) => {
                    notifications.error(e.clone());
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <ModalFrame title=title on_close=on_close closing=closing on_exited=on_exited>
            <form on:submit=on_submit>
                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    {fields
                        .get_value()
                        .into_iter()
                        .map(|field| view! { <FormField field=field values=values errors=errors disabled=busy /> })
                        .collect_view()}
                </div>
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=busy
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=busy
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                </div>
            </form>
        </ModalFrame>
    }
}

#[component]
fn FormField(
    field: FieldDef,
    values: RwSignal<FormValues>,
    errors: RwSignal<FieldErrors>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let name = field.name;
    let input_id = format!("field-{}", name);
    let required = field.rules.is_required();
    let value = move || values.with(|v| v.get(name).to_string());
    let set_value = move |raw: String| values.update(|v| v.set(name, raw));
    let message = move || errors.with(|e| e.get(name).map(str::to_string));

    let control = match field.input {
        FieldInput::Checkbox => view! {
            <input
                id=input_id.clone()
                type="checkbox"
                prop:checked=move || values.with(|v| v.flag(name))
                on:change=move |ev| set_value(event_target_checked(&ev).to_string())
                disabled=move || disabled.get()
            />
        }
        .into_any(),
        FieldInput::Select(options) => view! {
            <select
                id=input_id.clone()
                prop:value=value
                on:change=move |ev| set_value(event_target_value(&ev))
                disabled=move || disabled.get()
            >
                <option value="">"Select..."</option>
                {options
                    .into_iter()
                    .map(|(option, label)| view! { <option value=option>{label}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldInput::MultiText => view! {
            <textarea
                id=input_id.clone()
                rows="4"
                placeholder="Comma separated"
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        }
        .into_any(),
        other => {
            let input_type = match other {
                FieldInput::Email => "email",
                FieldInput::Number => "number",
                FieldInput::Date => "date",
                _ => "text",
            };
            view! {
                <input
                    id=input_id.clone()
                    type=input_type
                    prop:value=value
                    on:input=move |ev| set_value(event_target_value(&ev))
                    disabled=move || disabled.get()
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="form__group" class:form__group--invalid=move || message().is_some()>
            <label for=input_id>
                {field.label}
                {required.then_some(" *")}
            </label>
            {control}
            {move || message().map(|m| view! { <div class="form__error">{m}</div> })}
        </div>
    }
}
