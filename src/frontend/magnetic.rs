use blik_studio::{motion::MotionPreference, pointer::PointerFollow};
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;

use super::follow::{bounds_of, set_transform, FollowDriver};

/// Pointer handlers are `None` under reduced motion, so nothing is attached.
struct Magnetic {
    node: NodeRef,
    onmousemove: Option<Callback<MouseEvent>>,
    onmouseleave: Option<Callback<MouseEvent>>,
}

#[hook]
fn use_magnetic(motion: MotionPreference) -> Magnetic {
    let node = use_node_ref();
    let driver = {
        let node = node.clone();
        use_memo(motion, move |motion| {
            FollowDriver::new(node, PointerFollow::magnetic(*motion), Box::new(set_transform))
        })
    };

    {
        let driver = Rc::clone(&driver);
        use_effect_with(motion, move |_| move || driver.stop());
    }

    if !driver.is_enabled() {
        return Magnetic {
            node,
            onmousemove: None,
            onmouseleave: None,
        };
    }

    let onmousemove = {
        let driver = Rc::clone(&driver);
        let node = node.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(element) = node.cast::<Element>() {
                driver.pointer_move(event.client_x(), event.client_y(), bounds_of(&element));
            }
        })
    };

    let onmouseleave = {
        let driver = Rc::clone(&driver);
        Callback::from(move |_event: MouseEvent| driver.pointer_leave())
    };

    Magnetic {
        node,
        onmousemove: Some(onmousemove),
        onmouseleave: Some(onmouseleave),
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct MagneticButtonProps {
    pub motion: MotionPreference,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(AttrValue::Static("button"))]
    pub button_type: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
}

#[function_component(MagneticButton)]
pub(super) fn magnetic_button(props: &MagneticButtonProps) -> Html {
    let magnetic = use_magnetic(props.motion);

    html! {
        <button
            ref={magnetic.node}
            class={classes!("magnetic", props.class.clone())}
            type={props.button_type.clone()}
            disabled={props.disabled}
            aria-label={props.aria_label.clone()}
            onclick={props.onclick.clone()}
            onmousemove={magnetic.onmousemove}
            onmouseleave={magnetic.onmouseleave}
        >
            {props.children.clone()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct MagneticLinkProps {
    pub motion: MotionPreference,
    pub href: AttrValue,
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub external: bool,
}

#[function_component(MagneticLink)]
pub(super) fn magnetic_link(props: &MagneticLinkProps) -> Html {
    let magnetic = use_magnetic(props.motion);
    let (target, rel) = if props.external {
        (Some("_blank"), Some("noopener noreferrer"))
    } else {
        (None, None)
    };

    html! {
        <a
            ref={magnetic.node}
            class={classes!("magnetic", props.class.clone())}
            href={props.href.clone()}
            target={target}
            rel={rel}
            onmousemove={magnetic.onmousemove}
            onmouseleave={magnetic.onmouseleave}
        >
            {props.children.clone()}
        </a>
    }
}
