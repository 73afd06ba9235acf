use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ButtonProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
    pub onclick: Callback<MouseEvent>,
}

/// Plain labelled button, extra classes are appended to the base style.
#[function_component]
pub(crate) fn Button(props: &ButtonProps) -> Html {
    let class = classes!("btn", props.class.clone());
    html! {
        <button type="button" {class} onclick={props.onclick.clone()}>
            { props.children.clone() }
        </button>
    }
}
