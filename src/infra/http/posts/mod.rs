mod errors;
mod forms;
mod handlers;

pub(super) use handlers::{
    cancel_post_fragment, create_post, delete_post, draft_list, edit_post_form,
    edit_post_fragment, new_post_form, post_detail, post_list, publish_post, update_post,
    update_post_fragment,
};
