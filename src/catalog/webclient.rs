//! Web client routes.
//!
//! `userdata/` and `history/` have dedicated routes, so the generic
//! `load_template` menu list leaves them out. Every menu path then reverses
//! to a path that resolves back to the same route name.

use crate::routing::RouteSpec;

/// Handler reference bound to `web_image_viewer` unless configured otherwise.
pub const DEFAULT_VIEWER_VIEW: &str = "webgateway.full_viewer";

pub fn routes(viewer_view: &str) -> Vec<RouteSpec> {
    let mut routes = vec![
        // Home page is the main 'Data' page.
        RouteSpec::path("", "webclient.load_template", "webindex").with_default("menu", "userdata"),
        RouteSpec::path("userdata/", "webclient.load_template", "userdata").with_default("menu", "userdata"),
        RouteSpec::path("history/", "webclient.load_template", "history").with_default("menu", "history"),
        RouteSpec::path(
            "<enum(public,search,help,usertags):menu>/",
            "webclient.load_template",
            "load_template",
        ),
        RouteSpec::path("login/", "webclient.login", "weblogin"),
        RouteSpec::path("logout/", "webclient.logout", "weblogout"),
        RouteSpec::path("active_group/", "webclient.change_active_group", "change_active_group"),
        RouteSpec::path("group_user_content/", "webclient.group_user_content", "group_user_content"),
        RouteSpec::path("activities/", "webclient.activities", "activities"),
        RouteSpec::path("activities_json/", "webclient.activities", "activities_json")
            .with_default("template", "json"),
        RouteSpec::path(
            "activities_update/[<enum(clean):action>/]",
            "webclient.activities_update",
            "activities_update",
        ),
        RouteSpec::path(
            "load_plate/[<enum(plate,acquisition):o1_type>/][<int:o1_id>/]",
            "webclient.load_plate",
            "load_plate",
        ),
        // Query e.g. ?Image=1,2&Dataset=3
        RouteSpec::path("load_chgrp_groups/", "webclient.load_chgrp_groups", "load_chgrp_groups"),
        RouteSpec::path(
            "load_chgrp_target/<int:group_id>/<enum(project,dataset,screen):target_type>/",
            "webclient.load_chgrp_target",
            "load_chgrp_target",
        ),
        RouteSpec::path(
            "load_calendar/[<digits(4):year>/<digits(1,2):month>/]",
            "webclient.load_calendar",
            "load_calendar",
        ),
        RouteSpec::path(
            "load_history/[<digits(4):year>/<digits(1,2):month>/<digits(1,2):day>/]",
            "webclient.load_history",
            "load_history",
        ),
        RouteSpec::path(
            "load_searching/[<enum(form):form>/]",
            "webclient.load_searching",
            "load_searching",
        ),
        RouteSpec::path(
            "metadata_details/[<alpha:c_type>/<int:c_id>/][<int:share_id>/]",
            "webclient.load_metadata_details",
            "load_metadata_details",
        ),
        RouteSpec::path(
            "metadata_acquisition/<alpha:c_type>/<int:c_id>/[<int:share_id>/]",
            "webclient.load_metadata_acquisition",
            "load_metadata_acquisition",
        ),
        RouteSpec::path(
            "metadata_preview/<enum(image,well):c_type>/<int:c_id>/[<int:share_id>/]",
            "webclient.load_metadata_preview",
            "load_metadata_preview",
        ),
        RouteSpec::path(
            "metadata_hierarchy/<alpha:c_type>/<int:c_id>/[<int:share_id>/]",
            "webclient.load_metadata_hierarchy",
            "load_metadata_hierarchy",
        ),
        RouteSpec::path(
            "get_thumbnails/[<int:share_id>/]",
            "webgateway.get_thumbnails_json",
            "get_thumbnails_json",
        ),
        RouteSpec::path(
            "get_thumbnail/<int:iid>/[<int:share_id>/]",
            "webgateway.get_thumbnail_json",
            "get_thumbnail_json",
        )
        .with_default("fallback_thumbnail", true),
        RouteSpec::path(
            "render_thumbnail/<int:iid>/[<int:share_id>/]",
            "webgateway.render_thumbnail",
            "render_thumbnail",
        )
        .with_default("fallback_thumbnail", true),
        RouteSpec::path(
            "render_thumbnail/size/<int:w>/<int:iid>/[<int:share_id>/]",
            "webgateway.render_thumbnail",
            "render_thumbnail_resize",
        )
        .with_default("fallback_thumbnail", true),
        RouteSpec::path(
            "edit_channel_names/<int:imageId>/",
            "webclient.edit_channel_names",
            "edit_channel_names",
        ),
    ];

    // Image rendering; most accept a leading share id.
    routes.extend([
        RouteSpec::path(
            "[<int:share_id>/]render_image_region/<int:iid>/<int:z>/<int:t>/",
            "webgateway.render_image_region",
            "web_render_image_region",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_birds_eye_view/<str:iid>/[<str:size>/]",
            "webgateway.render_birds_eye_view",
            "web_render_birds_eye_view",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_image/<str:iid>/[<str:z>/][<str:t>/]",
            "webgateway.render_image",
            "web_render_image",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_image_download/<str:iid>/[<str:z>/][<str:t>/]",
            "webgateway.render_image",
            "web_render_image_download",
        )
        .with_default("download", true),
        RouteSpec::path("[<int:share_id>/]img_detail/<int:iid>/", viewer_view, "web_image_viewer"),
        RouteSpec::path(
            "[<int:share_id>/]imgData/<int:iid>/",
            "webgateway.image_data_json",
            "web_imageData_json",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_row_plot/<str:iid>/<str:z>/<str:t>/<str:y>/[<str:w>/]",
            "webgateway.render_row_plot",
            "web_render_row_plot",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_col_plot/<str:iid>/<str:z>/<str:t>/<str:x>/[<str:w>/]",
            "webgateway.render_col_plot",
            "web_render_col_plot",
        ),
        RouteSpec::path(
            "[<int:share_id>/]render_split_channel/<str:iid>/<str:z>/<str:t>/",
            "webgateway.render_split_channel",
            "web_render_split_channel",
        ),
        RouteSpec::path(
            "saveImgRDef/<str:iid>/",
            "webgateway.save_image_rdef_json",
            "web_save_image_rdef_json",
        ),
        RouteSpec::path(
            "[<int:share_id>/]getImgRDef/",
            "webgateway.get_image_rdef_json",
            "web_get_image_rdef_json",
        ),
        RouteSpec::path(
            "[<int:share_id>/]copyImgRDef/",
            "webgateway.copy_image_rdef_json",
            "copy_image_rdef_json",
        ),
        RouteSpec::path("[<int:share_id>/]luts/", "webgateway.list_luts_json", "web_list_luts"),
    ]);

    // Delete/chgrp dialogs, annotations, files and scripts.
    routes.extend([
        RouteSpec::path(
            "fileset_check/<enum(delete,chgrp):action>/",
            "webclient.fileset_check",
            "fileset_check",
        ),
        // 'group_id', object types and ids in POST data.
        RouteSpec::path("chgrpDryRun/", "webclient.chgrp_dry_run", "chgrpDryRun"),
        RouteSpec::path("download_placeholder/", "webclient.download_placeholder", "download_placeholder"),
        RouteSpec::path("chgrp/", "webclient.chgrp", "chgrp"),
        RouteSpec::path(
            "action/<alpha:action>/[<alpha:o_type>/][<int:o_id>/]",
            "webclient.manage_action_containers",
            "manage_action_containers",
        ),
        RouteSpec::path("batch_annotate/", "webclient.batch_annotate", "batch_annotate"),
        RouteSpec::path("annotate_tags/", "webclient.annotate_tags", "annotate_tags"),
        RouteSpec::path(
            "marshal_tagging_form_data/",
            "webclient.marshal_tagging_form_data",
            "marshal_tagging_form_data",
        ),
        RouteSpec::path("annotate_rating/", "webclient.annotate_rating", "annotate_rating"),
        RouteSpec::path("annotate_comment/", "webclient.annotate_comment", "annotate_comment"),
        RouteSpec::path("annotate_file/", "webclient.annotate_file", "annotate_file"),
        RouteSpec::path("annotate_map/", "webclient.annotate_map", "annotate_map"),
        RouteSpec::path("annotation/<int:annId>/", "webclient.download_annotation", "download_annotation"),
        RouteSpec::path(
            "load_original_metadata/<int:imageId>/[<int:share_id>/]",
            "webclient.load_original_metadata",
            "load_original_metadata",
        ),
        RouteSpec::path(
            "download_orig_metadata/<int:imageId>/",
            "webclient.download_orig_metadata",
            "download_orig_metadata",
        ),
        RouteSpec::path(
            "omero_table/<int:file_id>/[<enum(json,csv):mtype>/]",
            "webclient.omero_table",
            "omero_table",
        ),
        RouteSpec::path("avatar/<int:oid>/", "webclient.avatar", "avatar"),
        RouteSpec::path("list_scripts/", "webclient.list_scripts", "list_scripts"),
        RouteSpec::path("script_ui/<int:scriptId>/", "webclient.script_ui", "script_ui"),
        // Script parameters in POST data.
        RouteSpec::path("script_run/<int:scriptId>/", "webclient.script_run", "script_run"),
        RouteSpec::path("script_upload/", "webclient.script_upload", "script_upload"),
        // stderr, stdout etc.
        RouteSpec::path(
            "get_original_file/[<int:fileId>/]",
            "webclient.get_original_file",
            "get_original_file",
        ),
        RouteSpec::path(
            "download_original_file/[<int:fileId>/]",
            "webclient.get_original_file",
            "download_original_file",
        )
        .with_default("download", true),
        RouteSpec::path(
            "figure_script/<enum(SplitView,Thumbnail,MakeMovie):scriptName>/",
            "webclient.figure_script",
            "figure_script",
        ),
        // Must be POST.
        RouteSpec::path("ome_tiff_script/<int:imageId>/", "webclient.ome_tiff_script", "ome_tiff_script"),
        RouteSpec::path("ome_tiff_info/<int:imageId>/", "webclient.ome_tiff_info", "ome_tiff_info"),
        RouteSpec::path("keepalive_ping/", "webclient.keepalive_ping", "keepalive_ping"),
    ]);

    // Legacy, unversioned JSON.
    routes.extend([
        RouteSpec::path("api/groups/", "webclient.api_group_list", "api_groups"),
        RouteSpec::path(
            "api/experimenters/<signed:experimenter_id>/",
            "webclient.api_experimenter_detail",
            "api_experimenter",
        ),
        // Experimenters may own datasets outside any project.
        RouteSpec::path("api/containers/", "webclient.api_container_list", "api_containers"),
        RouteSpec::path("api/datasets/", "webclient.api_dataset_list", "api_datasets"),
        RouteSpec::path("api/images/", "webclient.api_image_list", "api_images"),
        // The only route where a share connection is taken from the path.
        RouteSpec::path(
            "api/share_images/<int:share_id>/",
            "webclient.api_image_list",
            "api_share_images",
        ),
        RouteSpec::path("api/plates/", "webclient.api_plate_list", "api_plates"),
        RouteSpec::path(
            "api/plate_acquisitions/",
            "webclient.api_plate_acquisition_list",
            "api_plate_acquisitions",
        ),
        // POST creates links, DELETE removes them; links in the json body.
        RouteSpec::path("api/links/", "webclient.api_links", "api_links"),
        RouteSpec::path(
            "api/paths_to_object/",
            "webclient.api_paths_to_object",
            "api_paths_to_object",
        ),
        // ?image=1,2&dataset=3
        RouteSpec::path("api/parent_links/", "webclient.api_parent_links", "api_parent_links"),
        RouteSpec::path(
            "api/tags/",
            "webclient.api_tags_and_tagged_list",
            "api_tags_and_tagged",
        ),
        RouteSpec::path("api/annotations/", "webclient.api_annotations", "api_annotations"),
        RouteSpec::path("api/shares/", "webclient.api_share_list", "api_shares"),
    ]);

    routes
}
