/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

// base urls
pub(crate) const DEFAULT_MOBILE_BASE_URL: &str = "http://m.dcinside.com";
pub(crate) const DEFAULT_UPLOAD_BASE_URL: &str = "http://upload.dcinside.com";
pub(crate) const DEFAULT_LOGIN_BASE_URL: &str = "https://dcid.dcinside.com";

pub(crate) const DEFAULT_REST_TIMEOUT: u64 = 30;

// paths
pub(crate) const WRITE_VERIFY_PATH: &str = "/_option_write.php";
pub(crate) const UPLOAD_PATH: &str = "/upload_imgfree_mobile.php";
pub(crate) const WRITE_PATH: &str = "/g_write.php";
pub(crate) const DELETE_VERIFY_PATH: &str = "/_access_token.php";
pub(crate) const DELETE_PATH: &str = "/_option_write.php";
pub(crate) const VOTE_UP_PATH: &str = "/api/_recommend_up.php";
pub(crate) const VOTE_DOWN_PATH: &str = "/api/_recommend_down.php";
pub(crate) const REPORT_PATH: &str = "/api/report_upload.php";
pub(crate) const LOGIN_PATH: &str = "/join/member_check.php";
pub(crate) const LOGOUT_PATH: &str = "/join/logout.php";
pub(crate) const GALLOG_ARTICLE_DELETE_PATH: &str = "/api/gall_del.php";
pub(crate) const GALLOG_COMMENT_DELETE_PATH: &str = "/api/comment_del.php";

// content types
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
/// The member and gallog apis are sent forms without a charset parameter.
pub(crate) const FORM_CONTENT_TYPE_NO_CHARSET: &str = "application/x-www-form-urlencoded";

// field names, exact strings expected by the remote side
pub(crate) const FIELD_ID: &str = "id";
pub(crate) const FIELD_NO: &str = "no";
pub(crate) const FIELD_MODE: &str = "mode";
pub(crate) const FIELD_NAME: &str = "name";
pub(crate) const FIELD_PASSWORD: &str = "password";
pub(crate) const FIELD_USER_ID: &str = "user_id";
pub(crate) const FIELD_SUBJECT: &str = "subject";
pub(crate) const FIELD_MEMO: &str = "memo";
pub(crate) const FIELD_FILTER: &str = "filter";
pub(crate) const FIELD_MOBILE_KEY: &str = "mobile_key";
pub(crate) const FIELD_FL_DATA: &str = "FL_DATA";
pub(crate) const FIELD_OFL_DATA: &str = "OFL_DATA";
pub(crate) const FIELD_BLOCK_KEY: &str = "Block_key";
pub(crate) const FIELD_W_SUBJECT: &str = "w_subject";
pub(crate) const FIELD_W_MEMO: &str = "w_memo";
pub(crate) const FIELD_W_FILTER: &str = "w_filter";
pub(crate) const FIELD_IMG_ID: &str = "imgId";
pub(crate) const FIELD_IMG_NUM: &str = "img_num";
pub(crate) const FIELD_TOKEN_VERIFY: &str = "token_verify";
pub(crate) const FIELD_WRITE_PW: &str = "write_pw";
pub(crate) const FIELD_CON_KEY: &str = "con_key";
pub(crate) const FIELD_COMMENT_NO: &str = "comment_no";
pub(crate) const FIELD_REPORT_URL: &str = "report_url";
pub(crate) const FIELD_REPORT_MEMO: &str = "report_memo";

// field values
pub(crate) const MODE_WRITE_VERIFY: &str = "write_verify";
pub(crate) const MODE_WRITE: &str = "write";
pub(crate) const MODE_BOARD_DELETE: &str = "board_del2";
pub(crate) const MOBILE_KEY_NOMEMBER: &str = "mobile_nomember";
pub(crate) const TOKEN_VERIFY_NONUSER_DELETE: &str = "nonuser_del";
pub(crate) const TOKEN_VERIFY_GALLOG_DELETE: &str = "dc_check2";
pub(crate) const FILTER_ON: &str = "1";
// the mobile uploader always announces the maximum slot count
pub(crate) const IMG_NUM: &str = "11";

/// Field name of the `index`-th attachment in an upload body.
pub(crate) fn upload_field_name(index: usize) -> String {
    format!("upload[{}]", index)
}
