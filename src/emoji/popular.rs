//! Tier 1: 人気絵文字の静的テーブル
//!
//! 配列の順序がそのまま変換時の走査順になる。
//! 短いASCII顔文字（`:o` など）は長いコードの一部に一致してしまうため末尾に置く。

/// 人気絵文字（コード, グリフ）
pub const POPULAR_EMOJIS: &[(&str, &str)] = &[
    // 顔・感情
    (":grinning_face:", "😀"),
    (":grinning_face_with_big_eyes:", "😃"),
    (":grinning_face_with_smiling_eyes:", "😄"),
    (":beaming_face_with_smiling_eyes:", "😁"),
    (":grinning_squinting_face:", "😆"),
    (":grinning_face_with_sweat:", "😅"),
    (":rolling_on_the_floor_laughing:", "🤣"),
    (":face_with_tears_of_joy:", "😂"),
    (":slightly_smiling_face:", "🙂"),
    (":upside_down_face:", "🙃"),
    (":winking_face:", "😉"),
    (":smiling_face_with_smiling_eyes:", "😊"),
    (":smiling_face_with_halo:", "😇"),
    (":smiling_face_with_hearts:", "🥰"),
    (":smiling_face_with_heart_eyes:", "😍"),
    (":star_struck:", "🤩"),
    (":face_blowing_a_kiss:", "😘"),
    (":kissing_face:", "😗"),
    (":smiling_face:", "☺️"),
    (":thinking_face:", "🤔"),
    (":neutral_face:", "😐"),
    (":expressionless_face:", "😑"),
    (":face_without_mouth:", "😶"),
    (":smirking_face:", "😏"),
    (":unamused_face:", "😒"),
    (":face_with_rolling_eyes:", "🙄"),
    (":grimacing_face:", "😬"),
    (":relieved_face:", "😌"),
    (":pensive_face:", "😔"),
    (":sleepy_face:", "😪"),
    (":sleeping_face:", "😴"),
    (":face_with_medical_mask:", "😷"),
    (":hot_face:", "🥵"),
    (":cold_face:", "🥶"),
    (":woozy_face:", "🥴"),
    (":dizzy_face:", "😵"),
    (":exploding_head:", "🤯"),
    (":cowboy_hat_face:", "🤠"),
    (":partying_face:", "🥳"),
    (":smiling_face_with_sunglasses:", "😎"),
    (":nerd_face:", "🤓"),
    (":confused_face:", "😕"),
    (":worried_face:", "😟"),
    (":slightly_frowning_face:", "🙁"),
    (":frowning_face:", "☹️"),
    (":face_with_open_mouth:", "😮"),
    (":hushed_face:", "😯"),
    (":astonished_face:", "😲"),
    (":flushed_face:", "😳"),
    (":pleading_face:", "🥺"),
    (":crying_face:", "😢"),
    (":loudly_crying_face:", "😭"),
    (":face_screaming_in_fear:", "😱"),
    (":angry_face:", "😠"),
    (":pouting_face:", "😡"),
    (":skull:", "💀"),
    // ジェスチャー・手
    (":thumbs_up:", "👍"),
    (":thumbs_down:", "👎"),
    (":ok_hand:", "👌"),
    (":victory_hand:", "✌️"),
    (":crossed_fingers:", "🤞"),
    (":raised_hand:", "✋"),
    (":waving_hand:", "👋"),
    (":call_me_hand:", "🤙"),
    (":flexed_biceps:", "💪"),
    (":clapping_hands:", "👏"),
    (":raising_hands:", "🙌"),
    (":folded_hands:", "🙏"),
    // ハート
    (":red_heart:", "❤️"),
    (":orange_heart:", "🧡"),
    (":yellow_heart:", "💛"),
    (":green_heart:", "💚"),
    (":blue_heart:", "💙"),
    (":purple_heart:", "💜"),
    (":black_heart:", "🖤"),
    (":white_heart:", "🤍"),
    (":broken_heart:", "💔"),
    // よく使われる記号
    (":fire:", "🔥"),
    (":hundred_points:", "💯"),
    (":collision:", "💥"),
    (":star:", "⭐"),
    (":glowing_star:", "🌟"),
    (":gem:", "💎"),
    (":crown:", "👑"),
    (":trophy:", "🏆"),
    (":rocket:", "🚀"),
    (":money_bag:", "💰"),
    (":gift:", "🎁"),
    (":birthday_cake:", "🎂"),
    (":party_popper:", "🎉"),
    (":confetti_ball:", "🎊"),
    (":balloon:", "🎈"),
    (":musical_note:", "🎵"),
    (":musical_notes:", "🎶"),
    // よく使われる短縮形
    (":heart:", "❤️"),
    (":thumbsup:", "👍"),
    (":thumbsdown:", "👎"),
    (":clap:", "👏"),
    (":wave:", "👋"),
    (":eyes:", "👀"),
    (":100:", "💯"),
    // Twitch/YouTubeでよく使われるスラング
    (":pogchamp:", "😲"),
    (":kappa:", "😏"),
    (":pepehands:", "😢"),
    (":pepega:", "🤪"),
    (":5head:", "🧠"),
    (":monkas:", "😰"),
    (":omegalul:", "😂"),
    (":lul:", "😂"),
    (":ez:", "😎"),
    (":sadge:", "😢"),
    (":copium:", "🤡"),
    (":hopium:", "🙏"),
    (":gigachad:", "💪"),
    (":based:", "😎"),
    (":cringe:", "😬"),
    (":sus:", "🤔"),
    (":no_cap:", "💯"),
    (":fr:", "💯"),
    (":bussin:", "🔥"),
    (":sheesh:", "😤"),
    (":W:", "🏆"),
    (":L:", "💀"),
    (":ratio:", "📈"),
    (":cap:", "🧢"),
    (":facts:", "💯"),
    (":periodt:", "💅"),
    (":slay:", "💅"),
    (":queen:", "👑"),
    (":king:", "👑"),
    (":goat:", "🐐"),
    (":mood:", "😌"),
    (":vibe:", "✨"),
    (":energy:", "⚡"),
    (":flex:", "💪"),
    (":lit:", "🔥"),
    (":bet:", "💯"),
    (":dead:", "💀"),
    (":crying:", "😭"),
    (":help:", "😭"),
    (":screaming:", "😱"),
    // ASCII顔文字
    (":)", "😊"),
    (":-)", "😊"),
    (":(", "😢"),
    (":-(", "😢"),
    (":D", "😄"),
    (":-D", "😄"),
    (":P", "😛"),
    (":-P", "😛"),
    (";)", "😉"),
    (";-)", "😉"),
    (":o", "😮"),
    (":-o", "😮"),
    (":O", "😱"),
    (":-O", "😱"),
    (":|", "😐"),
    (":-|", "😐"),
    (":*", "😘"),
    (":-*", "😘"),
    ("<3", "❤️"),
    ("</3", "💔"),
];
